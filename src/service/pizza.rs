use crate::{
    error::AppError,
    models::Pizza,
    repository::PizzaRepositoryState,
};

/// PizzaService
///
/// Owns the menu. Pizzas are added and removed, never edited.
#[derive(Clone)]
pub struct PizzaService {
    repo: PizzaRepositoryState,
}

impl PizzaService {
    pub fn new(repo: PizzaRepositoryState) -> Self {
        Self { repo }
    }

    /// get_menu
    ///
    /// Every pizza currently on the menu, sorted by name so responses are stable.
    pub async fn get_menu(&self) -> Vec<Pizza> {
        let mut menu = self.repo.list().await;
        menu.sort_by(|a, b| a.name.cmp(&b.name));
        menu
    }

    pub async fn get_pizza(&self, name: &str) -> Option<Pizza> {
        self.repo.get(name).await
    }

    pub async fn exists(&self, name: &str) -> bool {
        self.repo.contains(name).await
    }

    /// add_pizza_to_menu
    ///
    /// Validates the definition and stores it. The duplicate-name check happens
    /// inside the repository under its write lock.
    pub async fn add_pizza_to_menu(&self, mut pizza: Pizza) -> Result<Pizza, AppError> {
        pizza.name = pizza.name.trim().to_string();
        if pizza.name.is_empty() {
            return Err(AppError::Validation("pizza name must not be empty".to_string()));
        }
        if !pizza.price.is_finite() || pizza.price <= 0.0 {
            return Err(AppError::Validation(format!(
                "pizza price must be positive, got {}",
                pizza.price
            )));
        }

        let pizza = self.repo.insert(pizza).await?;
        tracing::info!(name = %pizza.name, price = pizza.price, "pizza added to menu");
        Ok(pizza)
    }

    /// delete_pizza_from_menu
    ///
    /// Existing orders that reference the pizza are left untouched.
    pub async fn delete_pizza_from_menu(&self, name: &str) -> Result<(), AppError> {
        match self.repo.remove(name).await {
            Some(_) => {
                tracing::info!(name = %name, "pizza removed from menu");
                Ok(())
            }
            None => Err(AppError::NotFound(format!("pizza '{}'", name))),
        }
    }
}

/// demo_menu
///
/// The menu preloaded when `SEED_MENU` is enabled.
pub fn demo_menu() -> Vec<Pizza> {
    let pizza = |name: &str, price: f64, ingredients: &[&str]| Pizza {
        name: name.to_string(),
        price,
        ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
    };

    vec![
        pizza("Margherita", 8.5, &["tomato", "mozzarella", "basil"]),
        pizza("Capricciosa", 10.0, &["tomato", "mozzarella", "ham", "mushrooms", "artichokes"]),
        pizza("Quattro Formaggi", 11.0, &["mozzarella", "gorgonzola", "parmesan", "fontina"]),
        pizza("Diavola", 9.5, &["tomato", "mozzarella", "spicy salami"]),
    ]
}
