//! Seed script
//!
//! Creates the first admin employee and, with `--demo`, a few customers with tickets.
//! Re-running is safe: accounts whose email already exists are skipped.
//!
//! Usage:
//!   DATABASE_URL=... EMPLOYEE_EMAIL=lucy@test.test EMPLOYEE_PASSWORD=... ./seed [--demo]
//!
//! Environment variables:
//!   DATABASE_URL      : PostgreSQL connection string (required)
//!   EMPLOYEE_EMAIL    : Email of the admin employee (required)
//!   EMPLOYEE_PASSWORD : Password of the admin employee (required)
//!   CUSTOMER_PASSWORD : Password for demo customers (default: Customer2022!)
//!   BCRYPT_COST       : bcrypt cost (default: 10)

use anyhow::{Context, Result};
use clap::Parser;
use std::env;

use helpdesk_api::{
    db::{self, PgStore, Store, StoreError},
    models::{
        principal::{NewPrincipal, Principal, PrincipalKind},
        ticket::NewTicket,
    },
    services::password::CredentialHasher,
};

#[derive(Parser)]
#[command(name = "seed", about = "Seed the help-desk database")]
struct Args {
    /// Also insert demo customers and tickets
    #[arg(long)]
    demo: bool,
}

const DEMO_CUSTOMERS: [(&str, &str, &str); 4] = [
    ("Zavier", "Yolanda", "zavier@test.test"),
    ("Herman", "Suzi", "herman@test.test"),
    ("Siri", "Minta", "minta@test.test"),
    ("Abigayle", "Janine", "abigayle@test.test"),
];

const DEMO_TICKETS: [(&str, &str, &str); 2] = [
    ("java update", "System requires a java update", "High"),
    ("printer offline", "The office printer is not reachable from my laptop", "Low"),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;
    let employee_email = env::var("EMPLOYEE_EMAIL").context("EMPLOYEE_EMAIL required")?;
    let employee_password = env::var("EMPLOYEE_PASSWORD").context("EMPLOYEE_PASSWORD required")?;
    let cost: u32 = env::var("BCRYPT_COST")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .context("BCRYPT_COST must be a number")?;
    let hasher = CredentialHasher::new(cost);

    let pool = db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool).await?;
    let store = PgStore::new(pool);

    let admin = NewPrincipal {
        first_name: "Lucy".into(),
        last_name: "Adams".into(),
        email: employee_email,
        password_hash: hasher.hash(&employee_password)?,
    };
    insert_or_skip(&store, PrincipalKind::Employee, admin).await?;

    if args.demo {
        let customer_password =
            env::var("CUSTOMER_PASSWORD").unwrap_or_else(|_| "Customer2022!".to_string());
        let digest = hasher.hash(&customer_password)?;

        for (first, last, email) in DEMO_CUSTOMERS {
            let customer = NewPrincipal {
                first_name: first.into(),
                last_name: last.into(),
                email: email.into(),
                password_hash: digest.clone(),
            };
            let Some(customer) = insert_or_skip(&store, PrincipalKind::Customer, customer).await? else {
                continue;
            };
            for (subject, body, priority) in DEMO_TICKETS {
                store
                    .create_ticket(&NewTicket {
                        customer_id: customer.id,
                        subject: subject.into(),
                        body: body.into(),
                        status: "new".into(),
                        priority: priority.into(),
                    })
                    .await?;
            }
        }
    }

    tracing::info!("Seed complete");
    Ok(())
}

async fn insert_or_skip(store: &PgStore, kind: PrincipalKind, new: NewPrincipal) -> Result<Option<Principal>> {
    match store.create_principal(kind, &new).await {
        Ok(p) => {
            tracing::info!(id = p.id, email = %p.email, ?kind, "created");
            Ok(Some(p))
        }
        Err(StoreError::Duplicate(email)) => {
            tracing::info!(%email, ?kind, "already exists, skipped");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
