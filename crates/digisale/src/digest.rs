// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `digisale digest` command implementation.
//!
//! Pulls the last two days of retail sales, asks Gemini for a short
//! manager-style writeup, and logs the result. The summary row is written
//! only after generation succeeds, so a failed API call leaves no partial
//! state behind.

use std::collections::HashSet;
use std::fmt::Write as _;

use chrono::{Duration, Local, NaiveDate};
use digisale_config::DigisaleConfig;
use digisale_core::{DigisaleError, RetailSaleRecord};
use digisale_gemini::GeminiClient;
use digisale_storage::{Database, queries};
use tracing::info;

/// Runs the `digisale digest` command.
pub async fn run_digest(config: &DigisaleConfig) -> Result<(), DigisaleError> {
    let api_key = config
        .gemini
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            DigisaleError::Config("gemini.api_key is required for the digest".into())
        })?;

    let today = Local::now().date_naive();
    let yesterday = today - Duration::days(1);

    let db = Database::open(&config.storage.database_path).await?;
    let sales = queries::sales::retail_sales_on(&db, yesterday, today).await?;

    if sales.is_empty() {
        info!(%yesterday, %today, "no retail sales in the digest window, nothing to do");
        println!("No sales recorded; digest skipped.");
        db.close().await?;
        return Ok(());
    }

    let prompt = build_digest_prompt(yesterday, today, &sales);
    let client = GeminiClient::new(api_key, config.gemini.model.clone())?;
    let digest = client.generate(&prompt).await?;

    queries::summary::insert_summary(&db, today, &digest).await?;
    db.close().await?;

    info!(%today, model = %config.gemini.model, "digest stored");
    println!("{digest}");
    Ok(())
}

/// Build the Gemini prompt from the two-day sales window.
fn build_digest_prompt(
    yesterday: NaiveDate,
    today: NaiveDate,
    sales: &[RetailSaleRecord],
) -> String {
    let (past, current): (Vec<_>, Vec<_>) = sales
        .iter()
        .partition(|s| s.purchase_date == yesterday);

    let expiring_today = sales
        .iter()
        .filter(|s| s.end_date == Some(today))
        .count();
    let expiring_yesterday = sales
        .iter()
        .filter(|s| s.end_date == Some(yesterday))
        .count();

    let past_customers: HashSet<&str> = past.iter().map(|s| s.customer.as_str()).collect();
    let mut repeat_customers: Vec<&str> = current
        .iter()
        .map(|s| s.customer.as_str())
        .filter(|c| !c.is_empty() && past_customers.contains(c))
        .collect();
    repeat_customers.sort_unstable();
    repeat_customers.dedup();

    let mut prompt = String::new();
    let _ = writeln!(prompt, "Sales on {yesterday}:");
    write_sale_lines(&mut prompt, &past);
    let _ = writeln!(prompt, "\nSales on {today}:");
    write_sale_lines(&mut prompt, &current);

    let _ = writeln!(prompt, "\nSubscriptions expiring on {yesterday}: {expiring_yesterday}");
    let _ = writeln!(prompt, "Subscriptions expiring on {today}: {expiring_today}");
    if repeat_customers.is_empty() {
        let _ = writeln!(prompt, "Repeat customers across both days: none");
    } else {
        let _ = writeln!(
            prompt,
            "Repeat customers across both days: {}",
            repeat_customers.join(", ")
        );
    }

    prompt.push_str(
        "\nYou are a friendly sales manager. Write a short daily digest of the sales \
         above in at most five lines. Compare the two days, call out total revenue and \
         profit, mention any repeat customers and expiring subscriptions, and end with \
         one upbeat remark for the team.",
    );
    prompt
}

fn write_sale_lines(prompt: &mut String, sales: &[&RetailSaleRecord]) {
    if sales.is_empty() {
        let _ = writeln!(prompt, "  (none)");
        return;
    }
    for sale in sales {
        let _ = write!(
            prompt,
            "  - {} to {} by {}: price {:.2}, profit {:.2}",
            sale.product_name, sale.customer, sale.seller, sale.price, sale.profit
        );
        if let Some(note) = sale.note.as_deref().filter(|n| !n.is_empty()) {
            let _ = write!(prompt, " ({note})");
        }
        prompt.push('\n');
    }
}
