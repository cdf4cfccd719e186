//! Command line definition.

use clap::{Parser, Subcommand};
use lib_core::{Filter, QueryDescriptor, Sort};

#[derive(Parser, Debug)]
#[command(name = "stockcheck")]
#[command(about = "Warehouse inventory and inspection client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Filters, sort and page shared by list commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Status to include (repeat for several)
    #[arg(long = "status")]
    pub statuses: Vec<String>,
    /// Goods type: MATERIAL or PRODUCT
    #[arg(long = "type")]
    pub goods_type: Option<String>,
    /// Only rows where this field is set
    #[arg(long = "has")]
    pub not_null: Vec<String>,
    /// Sort field, `-field` for descending (repeat for several)
    #[arg(long = "sort", allow_hyphen_values = true)]
    pub sort: Vec<String>,
    #[arg(long, default_value_t = 10)]
    pub page_size: i64,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub page_index: i64,
}

impl ListArgs {
    pub fn to_query(&self) -> QueryDescriptor {
        let mut query = QueryDescriptor::new();

        match self.statuses.as_slice() {
            [] => {}
            [status] => query = query.filter(Filter::eq("status", status.clone())),
            statuses => query = query.filter(Filter::in_set("status", statuses.iter().cloned())),
        }
        if let Some(goods_type) = &self.goods_type {
            query = query.filter(Filter::eq("type", goods_type.clone()));
        }
        for field in &self.not_null {
            query = query.filter(Filter::not_null(field.clone()));
        }
        for sort in &self.sort {
            query = query.order_by(match sort.strip_prefix('-') {
                Some(field) => Sort::desc(field),
                None => Sort::asc(sort.clone()),
            });
        }

        query.page(self.page_size, self.page_index)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOCKCHECK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// One-time password; confirms a pending sign-in instead of sending the password
        #[arg(long)]
        otp: Option<String>,
    },
    /// Forget the persisted session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// List inspection requests
    InspectionRequests {
        #[command(flatten)]
        list: ListArgs,
        /// Print a per-status count instead of the rows
        #[arg(long)]
        summary: bool,
    },
    /// Show one inspection request
    InspectionRequest { id: String },
    /// Show one inspection report with its pass/fail figures
    InspectionReport { id: String },
    /// Inspection dashboard counters
    Statistic,
    /// List inventory reports
    InventoryReports {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one inventory report with its counting progress
    InventoryReport { id: String },
    /// Record counted quantities: `--line <detail-id>=<quantity>`
    RecordInventory {
        id: String,
        #[arg(long = "line", required = true)]
        lines: Vec<String>,
    },
    /// Look up a receipt by its code
    Receipt { code: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_args_build_query() {
        let cli = Cli::parse_from([
            "stockcheck",
            "inspection-requests",
            "--status",
            "INSPECTING",
            "--status",
            "INSPECTED",
            "--has",
            "inspectionReport",
            "--sort",
            "-createdAt",
            "--page-size",
            "20",
            "--page-index",
            "2",
        ]);
        let Commands::InspectionRequests { list, summary } = cli.command else {
            panic!("wrong command");
        };
        assert!(!summary);

        let pairs = list.to_query().to_query_pairs();
        let rendered: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        assert_eq!(
            rendered,
            vec![
                "limit=20",
                "offset=40",
                "filter=status||$in||INSPECTING,INSPECTED",
                "filter=inspectionReport||$notnull",
                "order=createdAt,desc",
            ]
        );
    }

    #[test]
    fn test_single_status_is_equality() {
        let list = ListArgs {
            statuses: vec!["NOT_YET".to_string()],
            page_size: 10,
            ..Default::default()
        };
        let pairs = list.to_query().to_query_pairs();
        assert_eq!(pairs[2].1, "status||$eq||NOT_YET");
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
