//! Shopping Centre DB demo
//!
//! Fills the database with a few shops and products, queries and updates
//! them, then empties both tables again.

use shopping_centre::db::{self, Database, Fields, Table};
use shopping_centre::models::{Product, ProductCreate, Shop, ShopCreate};
use shopping_centre::{build_info, config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::from_default_env().add_directive(config::DEFAULT_LOG_DIRECTIVE.parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    build_info::log_startup();

    let db_path = config::database_path();
    tracing::info!(path = %db_path.display(), "using database");

    let database = Database::open(&db_path)?;
    let result = database.with_conn(run_demo);
    // Close on every path, then report the demo's own outcome
    database.close()?;
    result?;

    Ok(())
}

fn run_demo(conn: &rusqlite::Connection) -> db::DbResult<()> {
    db::ensure_schema(conn)?;

    let lego = Shop::create(conn, &ShopCreate::new("LEGO", Some("toys"), Some("2nd store")))?;
    let mercedes = Shop::create(conn, &ShopCreate::new("Mercedes", Some("cars"), Some("0 store")))?;
    Shop::create(conn, &ShopCreate::new("Tesco", Some("food"), Some("1st store")))?;

    let products = [
        (lego, "LEGO1", "lsdkjlfdssfd", 1000, 200),
        (lego, "LEGO2", "lslfk;kfslfdssfd", 2000, 400),
        (lego, "LEGO3", "sdjlksfdl", 1200, 20),
        (mercedes, "Marcedes1", "sdfjisjdfjfsd", 120000, 10),
        (mercedes, "bread", "jsdjsdkfsd", 5, 1000),
    ];
    let mut product_ids = Vec::with_capacity(products.len());
    for (shop_id, name, description, number, price) in products {
        let id = Product::create(
            conn,
            &ProductCreate {
                shop_id,
                name: name.to_string(),
                description: Some(description.to_string()),
                number,
                price,
            },
        )?;
        product_ids.push(id);
    }

    let shops: Vec<Shop> = db::select_where(conn, &Fields::new().with("id", lego))?;
    println!("Number of shops with id={}: {}", lego, shops.len());

    let lego_products: Vec<Product> = db::select_where(conn, &Fields::new().with("shop_id", lego))?;
    println!("Number of products in shop with id = {}: {}", lego, lego_products.len());

    let changed = db::update(
        conn,
        Table::Products,
        product_ids[1],
        &Fields::new().with("description", "bestseller"),
    )?;
    println!("Updated {} product(s)", changed);

    for product in Product::search_by_name(conn, "LEGO")? {
        match serde_json::to_string(&product) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!(error = %e, "could not serialize product"),
        }
    }

    let removed = db::delete_all(conn, Table::Products)?;
    println!("Deleted {} product(s)", removed);
    let removed = db::delete_all(conn, Table::Shops)?;
    println!("Deleted {} shop(s)", removed);

    Ok(())
}
