//! Application services

pub mod admin_service;
pub mod auth_service;
pub mod cascade;
pub mod collection_service;
pub mod favorite_service;
pub mod meal_plan_service;
mod passwords;
pub mod recipe_service;
pub mod user_service;

pub use admin_service::{AdminService, AdminStats, RoleChange};
pub use auth_service::{AuthResult, AuthService, LoginInput, RegisterInput};
pub use cascade::Cascade;
pub use collection_service::CollectionService;
pub use favorite_service::FavoriteService;
pub use meal_plan_service::MealPlanService;
pub use recipe_service::RecipeService;
pub use user_service::{PasswordChange, ProfileUpdate, UserService};

use recipe_security::JwtService;

use crate::repositories::Repositories;

/// Every service the HTTP layer needs, wired against one set of repositories.
pub struct Services {
    pub auth: AuthService,
    pub users: UserService,
    pub recipes: RecipeService,
    pub favorites: FavoriteService,
    pub collections: CollectionService,
    pub meal_plans: MealPlanService,
    pub admin: AdminService,
}

impl Services {
    pub fn new(repos: Repositories, jwt: JwtService, admin_emails: &[String]) -> Self {
        let cascade = Cascade::new(repos.clone());
        Self {
            auth: AuthService::new(repos.users.clone(), jwt, admin_emails),
            users: UserService::new(repos.users.clone(), cascade.clone()),
            recipes: RecipeService::new(repos.recipes.clone(), repos.users.clone(), cascade.clone()),
            favorites: FavoriteService::new(repos.favorites.clone(), repos.recipes.clone()),
            collections: CollectionService::new(repos.collections.clone(), repos.recipes.clone()),
            meal_plans: MealPlanService::new(repos.meal_plans.clone(), repos.recipes.clone()),
            admin: AdminService::new(repos.clone(), cascade),
        }
    }
}
