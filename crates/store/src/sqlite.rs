//! SQLite-backed stores.
//!
//! Both stores take an already-open [`SqlitePool`] so that a single database
//! handle can be created at startup and shared explicitly.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use crate::{
    CatalogStore, InventoryId, InventoryRecord, InventoryStore, MenuItem, MenuItemId, Result,
    StoreError,
};

const CREATE_MENU_ITEMS: &str = r#"
    CREATE TABLE IF NOT EXISTS menu_items (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        price REAL NOT NULL,
        calories INTEGER,
        category TEXT NOT NULL
    )
"#;

const ADD_MENU_ITEMS_CATEGORY: &str =
    "ALTER TABLE menu_items ADD COLUMN category TEXT NOT NULL DEFAULT ''";

const CREATE_INVENTORY: &str = r#"
    CREATE TABLE IF NOT EXISTS inventory (
        id INTEGER PRIMARY KEY,
        item_name TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        category TEXT
    )
"#;

/// Opens a pool for the database at `url`, creating the file if missing.
///
/// The pool holds a single long-lived connection: there is one reader/writer
/// at a time, and an in-memory database lives only as long as its connection.
pub async fn connect(url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await?;

    tracing::debug!(%url, "opened sqlite pool");
    Ok(pool)
}

/// Opens a private in-memory database (useful for tests).
pub async fn connect_in_memory() -> Result<SqlitePool> {
    connect("sqlite::memory:").await
}

/// SQLite-backed catalog store over the `menu_items` table.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    /// Creates a catalog store without touching the schema.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a catalog store and ensures its table exists.
    pub async fn open(pool: SqlitePool) -> Result<Self> {
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the `menu_items` table if it does not exist yet.
    ///
    /// Tables written before items carried a category are upgraded in place;
    /// their existing rows get an empty category and so stay unclassified.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_MENU_ITEMS).execute(&self.pool).await?;

        let has_category: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pragma_table_info('menu_items') WHERE name = 'category'",
        )
        .fetch_one(&self.pool)
        .await?;

        if has_category == 0 {
            sqlx::query(ADD_MENU_ITEMS_CATEGORY)
                .execute(&self.pool)
                .await?;
            tracing::info!("added category column to legacy menu_items table");
        }
        Ok(())
    }

    fn row_to_item(row: SqliteRow) -> Result<(MenuItem, MenuItemId)> {
        let calories: Option<i64> = row.try_get("calories")?;
        let calories = calories.unwrap_or(0);
        let calories = u32::try_from(calories).map_err(|_| StoreError::InvalidRow {
            column: "calories",
            reason: format!("{calories} is not a valid calorie count"),
        })?;

        let item = MenuItem {
            name: row.try_get("name")?,
            description: row
                .try_get::<Option<String>, _>("description")?
                .unwrap_or_default(),
            price: row.try_get("price")?,
            calories,
            category: row.try_get("category")?,
        };

        Ok((item, MenuItemId::new(row.try_get("id")?)))
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn create(&self, item: &MenuItem) -> Result<MenuItemId> {
        let result = sqlx::query(
            r#"
            INSERT INTO menu_items (name, description, price, calories, category)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(i64::from(item.calories))
        .bind(&item.category)
        .execute(&self.pool)
        .await?;

        Ok(MenuItemId::new(result.last_insert_rowid()))
    }

    async fn get_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>> {
        let row: Option<SqliteRow> = sqlx::query(
            r#"
            SELECT id, name, description, price, calories, category
            FROM menu_items
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_item(row)?.0)),
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<(MenuItem, MenuItemId)>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price, calories, category
            FROM menu_items
            WHERE name = ?
            ORDER BY id ASC
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn update(&self, id: MenuItemId, item: &MenuItem) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE menu_items
            SET name = ?, description = ?, price = ?, calories = ?, category = ?
            WHERE id = ?
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(i64::from(item.calories))
        .bind(&item.category)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: MenuItemId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<(MenuItem, MenuItemId)>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price, calories, category
            FROM menu_items
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_item).collect()
    }
}

/// SQLite-backed inventory store over the `inventory` table.
#[derive(Clone)]
pub struct SqliteInventoryStore {
    pool: SqlitePool,
}

impl SqliteInventoryStore {
    /// Creates an inventory store without touching the schema.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates an inventory store and ensures its table exists.
    pub async fn open(pool: SqlitePool) -> Result<Self> {
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the `inventory` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_INVENTORY).execute(&self.pool).await?;
        Ok(())
    }

    fn row_to_record(row: SqliteRow) -> Result<(InventoryRecord, InventoryId)> {
        let record = InventoryRecord {
            item_name: row.try_get("item_name")?,
            quantity: row.try_get("quantity")?,
            category: row
                .try_get::<Option<String>, _>("category")?
                .unwrap_or_default(),
        };

        Ok((record, InventoryId::new(row.try_get("id")?)))
    }
}

#[async_trait]
impl InventoryStore for SqliteInventoryStore {
    async fn create(&self, record: &InventoryRecord) -> Result<InventoryId> {
        let result =
            sqlx::query("INSERT INTO inventory (item_name, quantity, category) VALUES (?, ?, ?)")
                .bind(&record.item_name)
                .bind(record.quantity)
                .bind(&record.category)
                .execute(&self.pool)
                .await?;

        Ok(InventoryId::new(result.last_insert_rowid()))
    }

    async fn get_by_id(&self, id: InventoryId) -> Result<Option<InventoryRecord>> {
        let row: Option<SqliteRow> =
            sqlx::query("SELECT id, item_name, quantity, category FROM inventory WHERE id = ?")
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_record(row)?.0)),
            None => Ok(None),
        }
    }

    async fn get_by_name(&self, item_name: &str) -> Result<Option<(InventoryRecord, InventoryId)>> {
        let row: Option<SqliteRow> = sqlx::query(
            r#"
            SELECT id, item_name, quantity, category
            FROM inventory
            WHERE item_name = ?
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(item_name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_record).transpose()
    }

    async fn update(&self, id: InventoryId, record: &InventoryRecord) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET item_name = ?, quantity = ?, category = ?
            WHERE id = ?
            "#,
        )
        .bind(&record.item_name)
        .bind(record.quantity)
        .bind(&record.category)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: InventoryId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<(InventoryRecord, InventoryId)>> {
        let rows =
            sqlx::query("SELECT id, item_name, quantity, category FROM inventory ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Self::row_to_record).collect()
    }
}
