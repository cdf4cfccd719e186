//! Subcommand handlers. Each prints its result as JSON on stdout.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use serde_json::json;

use lib_auth::AuthContext;
use lib_client::dashboard::{count_by_status, InventoryProgress, PassFail};
use lib_client::{ApiService, Queries};
use shared::{RecordInventoryDetail, RecordInventoryReport};

use crate::args::Commands;

/// What every command needs.
pub struct AppContext {
    pub auth: Arc<AuthContext>,
    pub service: Arc<dyn ApiService>,
    pub queries: Queries,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse `<detail-id>=<quantity>`.
fn parse_line(line: &str) -> Result<RecordInventoryDetail> {
    let (id, quantity) = line
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected <detail-id>=<quantity>, got '{}'", line))?;
    let actual_quantity = quantity
        .trim()
        .parse()
        .with_context(|| format!("Invalid quantity in '{}'", line))?;

    Ok(RecordInventoryDetail {
        inventory_report_detail_id: id.trim().to_string(),
        actual_quantity,
        note: None,
    })
}

#[tracing::instrument(skip_all)]
pub async fn run(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password, otp } => {
            let response = match (otp, password) {
                (Some(otp), _) => ctx.service.confirm_otp(email, otp).await?,
                (None, Some(password)) => ctx.service.sign_in(email, password).await?,
                (None, None) => bail!("Either --password (or STOCKCHECK_PASSWORD) or --otp is required"),
            };
            print_json(&response.account)
        }
        Commands::Logout => {
            ctx.service.logout()?;
            ctx.queries.clear();
            print_json(&json!({ "signedOut": true }))
        }
        Commands::Whoami => {
            let account = ctx.auth.account().ok_or_else(|| anyhow!("Not signed in"))?;
            print_json(&json!({
                "displayName": account.display_name(),
                "account": account,
            }))
        }
        Commands::InspectionRequests { list, summary } => {
            let page = ctx.queries.inspection_requests(list.to_query()).fetch().await?;
            if summary {
                print_json(&count_by_status(&page.data))
            } else {
                print_json(&*page)
            }
        }
        Commands::InspectionRequest { id } => {
            let request = ctx.queries.inspection_request(&id).fetch().await?;
            print_json(&*request)
        }
        Commands::InspectionReport { id } => {
            let report = ctx.queries.inspection_report(&id).fetch().await?;
            let figures = PassFail::from_report(&report);
            print_json(&json!({
                "report": &*report,
                "passPercentage": figures.pass_percentage(),
                "failPercentage": figures.fail_percentage(),
            }))
        }
        Commands::Statistic => {
            let statistic = ctx.queries.inspection_statistic().fetch().await?;
            let figures = PassFail::from_statistic(&statistic);
            print_json(&json!({
                "statistic": &*statistic,
                "passPercentage": figures.pass_percentage(),
                "failPercentage": figures.fail_percentage(),
            }))
        }
        Commands::InventoryReports { list } => {
            let page = ctx.queries.inventory_reports(list.to_query()).fetch().await?;
            print_json(&*page)
        }
        Commands::InventoryReport { id } => {
            let report = ctx.queries.inventory_report(&id).fetch().await?;
            print_json(&json!({
                "report": &*report,
                "progress": InventoryProgress::from_report(&report),
            }))
        }
        Commands::RecordInventory { id, lines } => {
            let record = RecordInventoryReport {
                details: lines.iter().map(|line| parse_line(line)).collect::<Result<_>>()?,
            };
            let report = ctx.service.record_inventory(&id, &record).await?;
            print_json(&json!({
                "report": report,
                "progress": InventoryProgress::from_report(&report),
            }))
        }
        Commands::Receipt { code } => {
            let receipt = ctx.queries.receipt_by_code(&code).fetch().await?;
            print_json(&*receipt)
        }
    }
}
