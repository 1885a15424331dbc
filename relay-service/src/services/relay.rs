//! Structured generation and response shaping.

use super::error::GenerationError;
use super::metrics::record_generation;
use super::prompts;
use super::providers::{GenerationParams, TextProvider};
use super::schema::Schema;
use crate::models::{
    MenuItem, MenuList, OrderConfirmation, OrderRequest, Restaurant, RestaurantList,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;

pub const ROUTE_RESTAURANTS: &str = "restaurants";
pub const ROUTE_MENU: &str = "menu";
pub const ROUTE_PROCESS_ORDER: &str = "process_order";

/// Owns the model client and turns prompts into typed, validated payloads.
#[derive(Clone)]
pub struct Relay {
    provider: Arc<dyn TextProvider>,
}

impl Relay {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, GenerationError> {
        let list: RestaurantList = self
            .generate_structured(
                ROUTE_RESTAURANTS,
                prompts::RESTAURANTS_PROMPT,
                RestaurantList::schema(),
            )
            .await?;

        Ok(list
            .restaurants
            .into_iter()
            .map(Restaurant::normalized)
            .collect())
    }

    /// Every returned item carries `restaurant_name` exactly as requested,
    /// whatever the model echoed back.
    pub async fn generate_menu(&self, restaurant_name: &str) -> Result<Vec<MenuItem>, GenerationError> {
        let list: MenuList = self
            .generate_structured(
                ROUTE_MENU,
                &prompts::menu_prompt(restaurant_name),
                MenuList::schema(),
            )
            .await?;

        Ok(list
            .menu
            .into_iter()
            .map(|item| MenuItem {
                restaurant_name: restaurant_name.to_string(),
                ..item
            })
            .collect())
    }

    pub async fn confirm_order(
        &self,
        order: &OrderRequest,
    ) -> Result<OrderConfirmation, GenerationError> {
        self.generate_structured(
            ROUTE_PROCESS_ORDER,
            &prompts::order_prompt(order),
            OrderConfirmation::schema(),
        )
        .await
    }

    async fn generate_structured<T: DeserializeOwned>(
        &self,
        route: &'static str,
        prompt: &str,
        schema: Schema,
    ) -> Result<T, GenerationError> {
        let started = Instant::now();
        let result = self.try_generate(prompt, schema).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        record_generation(route, outcome, started.elapsed());

        result
    }

    async fn try_generate<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: Schema,
    ) -> Result<T, GenerationError> {
        let params = GenerationParams::structured(schema.clone());
        let response = self.provider.generate(prompt, &params).await?;

        let value: serde_json::Value = serde_json::from_str(response.text.trim())?;
        schema.validate(&value)?;

        Ok(serde_json::from_value(value)?)
    }
}
