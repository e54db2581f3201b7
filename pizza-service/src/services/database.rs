//! Database service for pizza-service.
//!
//! Handlers never touch the pool directly: each request opens a [`Session`]
//! with [`Database::begin`] (or [`Database::begin_write`] when it mutates),
//! runs its queries on that session, and commits.
//! A session dropped without `commit` rolls back, so every early return
//! leaves storage untouched.

use crate::models::{NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza};
use crate::services::metrics::DB_QUERY_DURATION;
use service_core::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

const SEED_RESTAURANTS: &[(&str, &str)] = &[
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const SEED_PIZZAS: &[(&str, &str)] = &[
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (price, restaurant index, pizza index) into the seed tables above.
const SEED_RESTAURANT_PIZZAS: &[(i64, usize, usize)] = &[(1, 0, 0), (4, 1, 1), (5, 2, 2)];

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "pizza-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to SQLite"
        );

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid database URL: {}", e))
            })?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("SQLite connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;

        timer.observe_duration();
        Ok(())
    }

    /// Apply the bundled schema.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Open a transaction scoped to one request.
    pub async fn begin(&self) -> Result<Session, AppError> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;
        Ok(Session { tx })
    }

    /// Open a transaction that takes the write lock up front.
    ///
    /// A deferred transaction that reads and then writes cannot upgrade its
    /// lock while another writer is active, and SQLite fails it immediately
    /// rather than waiting. Sessions that mutate must start here.
    pub async fn begin_write(&self) -> Result<Session, AppError> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;
        Ok(Session { tx })
    }

    /// Replace all rows with the sample restaurants, pizzas and prices.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<(), AppError> {
        let mut session = self.begin_write().await?;

        for table in ["restaurant_pizzas", "restaurants", "pizzas"] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *session.tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to clear {}: {}", table, e))
                })?;
        }

        let mut restaurant_ids = Vec::with_capacity(SEED_RESTAURANTS.len());
        for &(name, address) in SEED_RESTAURANTS {
            let id = sqlx::query_scalar::<_, i64>(
                "INSERT INTO restaurants (name, address) VALUES (?, ?) RETURNING id",
            )
            .bind(name)
            .bind(address)
            .fetch_one(&mut *session.tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to seed restaurant: {}", e))
            })?;
            restaurant_ids.push(id);
        }

        let mut pizza_ids = Vec::with_capacity(SEED_PIZZAS.len());
        for &(name, ingredients) in SEED_PIZZAS {
            let id = sqlx::query_scalar::<_, i64>(
                "INSERT INTO pizzas (name, ingredients) VALUES (?, ?) RETURNING id",
            )
            .bind(name)
            .bind(ingredients)
            .fetch_one(&mut *session.tx)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to seed pizza: {}", e)))?;
            pizza_ids.push(id);
        }

        for &(price, restaurant, pizza) in SEED_RESTAURANT_PIZZAS {
            session
                .insert_restaurant_pizza(&NewRestaurantPizza {
                    price,
                    restaurant_id: restaurant_ids[restaurant],
                    pizza_id: pizza_ids[pizza],
                })
                .await?;
        }

        session.commit().await?;
        info!(
            restaurants = SEED_RESTAURANTS.len(),
            pizzas = SEED_PIZZAS.len(),
            restaurant_pizzas = SEED_RESTAURANT_PIZZAS.len(),
            "Database seeded"
        );
        Ok(())
    }
}

/// One request's unit of work.
pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl Session {
    /// Commit everything done in this session.
    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit transaction: {}", e))
        })
    }

    // =========================================================================
    // Restaurant Operations
    // =========================================================================

    /// List all restaurants in primary-key order.
    #[instrument(skip(self))]
    pub async fn list_restaurants(&mut self) -> Result<Vec<Restaurant>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_restaurants"])
            .start_timer();

        let restaurants = sqlx::query_as::<_, Restaurant>(
            "SELECT id, name, address FROM restaurants ORDER BY id",
        )
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list restaurants: {}", e)))?;

        timer.observe_duration();

        Ok(restaurants)
    }

    /// Get a restaurant by ID.
    #[instrument(skip(self))]
    pub async fn find_restaurant(&mut self, id: i64) -> Result<Option<Restaurant>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_restaurant"])
            .start_timer();

        let restaurant = sqlx::query_as::<_, Restaurant>(
            "SELECT id, name, address FROM restaurants WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get restaurant: {}", e)))?;

        timer.observe_duration();

        Ok(restaurant)
    }

    /// Delete a restaurant row. Associations must already be gone.
    #[instrument(skip(self))]
    pub async fn delete_restaurant(&mut self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_restaurant"])
            .start_timer();

        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete restaurant: {}", e))
            })?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Pizza Operations
    // =========================================================================

    /// List all pizzas in primary-key order.
    #[instrument(skip(self))]
    pub async fn list_pizzas(&mut self) -> Result<Vec<Pizza>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_pizzas"])
            .start_timer();

        let pizzas =
            sqlx::query_as::<_, Pizza>("SELECT id, name, ingredients FROM pizzas ORDER BY id")
                .fetch_all(&mut *self.tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to list pizzas: {}", e))
                })?;

        timer.observe_duration();

        Ok(pizzas)
    }

    /// Get a pizza by ID.
    #[instrument(skip(self))]
    pub async fn find_pizza(&mut self, id: i64) -> Result<Option<Pizza>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_pizza"])
            .start_timer();

        let pizza =
            sqlx::query_as::<_, Pizza>("SELECT id, name, ingredients FROM pizzas WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *self.tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to get pizza: {}", e))
                })?;

        timer.observe_duration();

        Ok(pizza)
    }

    // =========================================================================
    // Restaurant Pizza Operations
    // =========================================================================

    /// List the association rows owned by a restaurant, ordered by ID.
    #[instrument(skip(self))]
    pub async fn list_restaurant_pizzas_for_restaurant(
        &mut self,
        restaurant_id: i64,
    ) -> Result<Vec<RestaurantPizza>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_restaurant_pizzas_for_restaurant"])
            .start_timer();

        let rows = sqlx::query_as::<_, RestaurantPizza>(
            r#"
            SELECT id, price, restaurant_id, pizza_id
            FROM restaurant_pizzas
            WHERE restaurant_id = ?
            ORDER BY id
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list restaurant pizzas: {}", e))
        })?;

        timer.observe_duration();

        Ok(rows)
    }

    /// Delete every association row owned by a restaurant. Returns the number removed.
    #[instrument(skip(self))]
    pub async fn delete_restaurant_pizzas_for_restaurant(
        &mut self,
        restaurant_id: i64,
    ) -> Result<u64, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_restaurant_pizzas_for_restaurant"])
            .start_timer();

        let result = sqlx::query("DELETE FROM restaurant_pizzas WHERE restaurant_id = ?")
            .bind(restaurant_id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!(
                    "Failed to delete restaurant pizzas: {}",
                    e
                ))
            })?;

        timer.observe_duration();

        Ok(result.rows_affected())
    }

    /// Insert a new association row.
    #[instrument(skip(self, input), fields(restaurant_id = input.restaurant_id, pizza_id = input.pizza_id))]
    pub async fn insert_restaurant_pizza(
        &mut self,
        input: &NewRestaurantPizza,
    ) -> Result<RestaurantPizza, AppError> {
        if !RestaurantPizza::is_valid_price(input.price) {
            return Err(AppError::InvalidInput(vec![
                service_core::error::VALIDATION_ERRORS_MESSAGE.to_string(),
            ]));
        }

        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert_restaurant_pizza"])
            .start_timer();

        let row = sqlx::query_as::<_, RestaurantPizza>(
            r#"
            INSERT INTO restaurant_pizzas (price, restaurant_id, pizza_id)
            VALUES (?, ?, ?)
            RETURNING id, price, restaurant_id, pizza_id
            "#,
        )
        .bind(input.price)
        .bind(input.restaurant_id)
        .bind(input.pizza_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to create restaurant pizza: {}", e))
        })?;

        timer.observe_duration();

        Ok(row)
    }
}
