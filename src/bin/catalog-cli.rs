use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Command-line client for the catalog proxy API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List upstream products with optional filters
    Products {
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        page: Option<i64>,
        #[arg(long)]
        page_size: Option<i64>,
    },
    /// Show one upstream product
    Product { id: i64 },
    /// List upstream categories
    Categories,
    /// List local products
    Local,
    /// Show one local product
    LocalProduct { id: i64 },
    /// Create a local product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        brand: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value_t = 0)]
        stock: i32,
        #[arg(long)]
        image: String,
        #[arg(long)]
        category: String,
    },
    /// Delete a local product
    Delete { id: i64 },
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Products {
            query,
            category,
            page,
            page_size,
        } => {
            let mut params: Vec<(&str, String)> = Vec::new();
            if let Some(q) = query {
                params.push(("query", q));
            }
            if let Some(c) = category {
                params.push(("category", c));
            }
            if let Some(p) = page {
                params.push(("page", p.to_string()));
            }
            if let Some(s) = page_size {
                params.push(("pageSize", s.to_string()));
            }
            client
                .get(format!("{}/api/products", base))
                .query(&params)
                .send()
                .await?
        }
        Commands::Product { id } => client.get(format!("{}/api/products/{}", base, id)).send().await?,
        Commands::Categories => client.get(format!("{}/api/categories", base)).send().await?,
        Commands::Local => client.get(format!("{}/api/local-products", base)).send().await?,
        Commands::LocalProduct { id } => {
            client
                .get(format!("{}/api/local-products/{}", base, id))
                .send()
                .await?
        }
        Commands::Create {
            name,
            brand,
            price,
            stock,
            image,
            category,
        } => {
            let body = json!({
                "name": name,
                "brand": brand,
                "price": price,
                "stock": stock,
                "image": image,
                "category": category,
            });
            client
                .post(format!("{}/api/products", base))
                .json(&body)
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .delete(format!("{}/api/products/{}", base, id))
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        if let Ok(text) = res.text().await {
            if !text.is_empty() {
                eprintln!("Response: {}", text);
            }
        }
        return Err(format!("API returned status {}", status).into());
    }

    if let Some(location) = res.headers().get(reqwest::header::LOCATION) {
        println!("Location: {}", location.to_str().unwrap_or("<binary>"));
    }

    let text = res.text().await?;
    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
