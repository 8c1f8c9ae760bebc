// Situational (calendar) tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, Tool};
use anyhow::Result;
use chrono::NaiveDate;
use sefaria_core::HebrewDate;
use sefaria_sdk::SefariaClient;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Key under which the Hebrew date is added to the calendars payload
pub const HEBREW_DATE_KEY: &str = "Hebrew Date";

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Tool to report today's date and learning schedule
pub struct SituationalInfoTool {
    client: Arc<SefariaClient>,
    today: fn() -> NaiveDate,
}

impl SituationalInfoTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self {
            client,
            today: local_today,
        }
    }

    /// Use a fixed clock instead of the server's local date
    pub fn with_clock(client: Arc<SefariaClient>, today: fn() -> NaiveDate) -> Self {
        Self { client, today }
    }
}

#[async_trait::async_trait]
impl Tool for SituationalInfoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_situational_info".to_string(),
            description: "Provides current Jewish calendar information including Hebrew date, parasha, holidays, etc.".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        // The server's date may differ from the caller's by a day
        let hebrew_date = HebrewDate::from_gregorian((self.today)()).to_string();

        match self.client.calendars().today().await {
            Ok(Value::Object(mut calendar)) => {
                calendar.insert(HEBREW_DATE_KEY.to_string(), Value::String(hebrew_date));
                Ok(CallToolResult::json(&calendar)?)
            }
            Ok(_) => Ok(calendar_unavailable("unexpected calendars payload", &hebrew_date)?),
            Err(e) => {
                warn!(error = %e, "Calendar lookup failed");
                Ok(calendar_unavailable(&e.to_string(), &hebrew_date)?)
            }
        }
    }
}

/// Error result that still carries the locally computed Hebrew date
fn calendar_unavailable(cause: &str, hebrew_date: &str) -> serde_json::Result<CallToolResult> {
    let mut body = serde_json::Map::new();
    body.insert(
        "error".to_string(),
        Value::String(format!("Could not retrieve calendar data from Sefaria: {}", cause)),
    );
    body.insert(HEBREW_DATE_KEY.to_string(), Value::String(hebrew_date.to_string()));

    let mut result = CallToolResult::json(&body)?;
    result.is_error = Some(true);
    Ok(result)
}
