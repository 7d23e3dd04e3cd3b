use crate::cli::commands::{ReportsAction, ReportsArgs};
use crate::config::TalentConfig;
use crate::db::Database;
use crate::errors::TalentError;

pub async fn handle_reports(args: ReportsArgs, config: TalentConfig) -> Result<(), TalentError> {
    let path = args.db.clone().unwrap_or_else(|| config.server().db);
    let db = Database::new(&path)?;

    match args.action {
        ReportsAction::List { limit, offset, json } => {
            let reports = db.list_reports(&args.owner, limit, offset)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else if reports.is_empty() {
                println!("No reports for {}", args.owner);
            } else {
                for r in reports {
                    println!("{}  {}  {}  {}  [{}]", r.id, r.created_at, r.company_name, r.company_url, r.provider);
                }
            }
        }
        ReportsAction::Show { id } => {
            let stored = db
                .get_report(&id, &args.owner)?
                .ok_or_else(|| TalentError::NotFound(format!("Report {} not found", id)))?;
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }
        ReportsAction::Delete { id } => {
            if !db.delete_report(&id, &args.owner)? {
                return Err(TalentError::NotFound(format!("Report {} not found", id)));
            }
            println!("Deleted {}", id);
        }
    }
    Ok(())
}
