//! Pizza Service - Restaurants, pizzas, and the prices restaurants charge for them.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
