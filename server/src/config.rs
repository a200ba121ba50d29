use anyhow::{Context, Result};
use chrono::NaiveDate;
use platform_db::DatabaseSettings;
use products_reports::seed::{DEFAULT_SEED_PASSWORD, SeedOptions};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub seed: SeedOptions,
    /// Apply pending migrations before seeding.
    pub auto_migrate: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database = DatabaseSettings::from_lookup(&lookup)?;

        let password = lookup("SEED_PASSWORD")
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_SEED_PASSWORD.to_string());
        let include_admin = flag(lookup("SEED_INCLUDE_ADMIN"), false);
        let auto_migrate = flag(lookup("SEED_AUTO_MIGRATE"), true);

        let mut seed = SeedOptions {
            password,
            include_admin,
            ..SeedOptions::default()
        };
        if let Some(raw) = lookup("SEED_REPORT_DATE") {
            seed.report_date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("invalid SEED_REPORT_DATE {raw:?}, expected YYYY-MM-DD"))?;
        }

        Ok(Self {
            database,
            seed,
            auto_migrate,
        })
    }
}

fn flag(value: Option<String>, default: bool) -> bool {
    value
        .map(|val| matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}
