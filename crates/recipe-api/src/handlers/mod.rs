//! HTTP handlers

pub mod admin;
pub mod auth;
pub mod collections;
pub mod fallback;
pub mod favorites;
pub mod health;
pub mod meal_plan;
pub mod public_recipes;
pub mod recipes;
pub mod users;
