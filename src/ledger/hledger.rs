//! hledger command-line adapter
//!
//! Runs `hledger ... -O json` and maps the JSON payloads onto the crate's
//! models. Only the first commodity amount of each posting or balance row is
//! used.

use std::path::PathBuf;
use std::process::Command;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};

use super::LedgerSource;
use crate::error::{MintedError, MintedResult};
use crate::models::{AccountBalance, DateRange, Posting, Quantity, Transaction};

#[derive(Debug, Deserialize)]
struct RawQuantity {
    #[serde(rename = "decimalMantissa")]
    decimal_mantissa: serde_json::Number,
    #[serde(rename = "decimalPlaces")]
    decimal_places: i64,
}

#[derive(Debug, Deserialize)]
struct RawAmount {
    #[serde(default)]
    acommodity: String,
    aquantity: RawQuantity,
}

#[derive(Debug, Deserialize)]
struct RawPosting {
    paccount: String,
    #[serde(default)]
    pamount: Vec<RawAmount>,
    #[serde(default)]
    pcomment: String,
}

#[derive(Debug, Deserialize)]
struct RawTransaction {
    tdate: String,
    #[serde(default)]
    tdescription: String,
    #[serde(default)]
    tpostings: Vec<RawPosting>,
}

/// `[name, display name, indent, amounts]`
#[derive(Debug, Deserialize)]
struct RawBalanceRow(
    String,
    serde_json::Value,
    serde_json::Value,
    Vec<RawAmount>,
);

/// `[rows, totals]`
#[derive(Debug, Deserialize)]
struct RawBalanceReport(Vec<RawBalanceRow>, serde_json::Value);

/// hledger never prints more precision than this
const MAX_DECIMAL_PLACES: u32 = 18;

impl RawQuantity {
    fn to_quantity(&self) -> MintedResult<Quantity> {
        let places = u32::try_from(self.decimal_places)
            .ok()
            .filter(|places| *places <= MAX_DECIMAL_PLACES)
            .ok_or_else(|| {
                MintedError::Upstream(format!("invalid decimalPlaces {}", self.decimal_places))
            })?;
        let mantissa = self.decimal_mantissa.as_i64().ok_or_else(|| {
            MintedError::Upstream(format!(
                "decimalMantissa out of range: {}",
                self.decimal_mantissa
            ))
        })?;
        Ok(Quantity::new(mantissa, places))
    }
}

fn first_amount(amounts: &[RawAmount]) -> MintedResult<(f64, String)> {
    match amounts.first() {
        Some(amount) => Ok((
            amount.aquantity.to_quantity()?.to_f64(),
            amount.acommodity.clone(),
        )),
        None => Ok((0.0, String::new())),
    }
}

/// Parse the payload of `hledger print -O json`
pub fn parse_transactions(payload: &[u8]) -> MintedResult<Vec<Transaction>> {
    let raw: Vec<RawTransaction> = serde_json::from_slice(payload)
        .map_err(|e| MintedError::Upstream(format!("malformed print output: {}", e)))?;

    raw.into_iter()
        .map(|txn| {
            let date = NaiveDate::parse_from_str(&txn.tdate, "%Y-%m-%d").map_err(|e| {
                MintedError::Upstream(format!("invalid transaction date '{}': {}", txn.tdate, e))
            })?;

            let mut transaction = Transaction::new(date, txn.tdescription);
            for posting in txn.tpostings {
                let (amount, _) = first_amount(&posting.pamount)?;
                transaction
                    .postings
                    .push(Posting::new(posting.paccount, amount).with_comment(posting.pcomment));
            }
            Ok(transaction)
        })
        .collect()
}

/// Parse the payload of `hledger balance -O json`
pub fn parse_balances(payload: &[u8]) -> MintedResult<Vec<AccountBalance>> {
    let RawBalanceReport(rows, _totals) = serde_json::from_slice(payload)
        .map_err(|e| MintedError::Upstream(format!("malformed balance output: {}", e)))?;

    let mut accounts = Vec::with_capacity(rows.len());
    for RawBalanceRow(name, _, _, amounts) in rows {
        if name.is_empty() {
            continue;
        }
        let (balance, currency) = first_amount(&amounts)?;
        accounts.push(AccountBalance::new(name, balance, currency));
    }
    Ok(accounts)
}

/// Ledger source backed by the `hledger` executable
#[derive(Debug, Clone)]
pub struct HledgerCli {
    binary: PathBuf,
    journal_file: PathBuf,
}

impl HledgerCli {
    pub fn new(journal_file: impl Into<PathBuf>) -> Self {
        Self {
            binary: PathBuf::from("hledger"),
            journal_file: journal_file.into(),
        }
    }

    /// Use a specific hledger executable
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    fn date_args(range: Option<&DateRange>) -> Vec<String> {
        match range {
            Some(range) => vec![
                "-b".to_string(),
                range.start.to_string(),
                "-e".to_string(),
                range.end.to_string(),
            ],
            None => Vec::new(),
        }
    }

    fn run(&self, args: &[String]) -> MintedResult<Vec<u8>> {
        debug!(
            binary = %self.binary.display(),
            journal = %self.journal_file.display(),
            ?args,
            "running hledger"
        );

        let output = Command::new(&self.binary)
            .arg("-f")
            .arg(&self.journal_file)
            .args(args)
            .output()
            .map_err(|e| {
                warn!(error = %e, "failed to start hledger");
                MintedError::Upstream(format!("failed to run {}: {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, stderr = %stderr.trim(), "hledger exited with an error");
            return Err(MintedError::Upstream(format!(
                "hledger exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }
}

impl LedgerSource for HledgerCli {
    fn accounts(&self, range: Option<&DateRange>) -> MintedResult<Vec<AccountBalance>> {
        let mut args = vec![
            "balance".to_string(),
            "--empty".to_string(),
            "-O".to_string(),
            "json".to_string(),
        ];
        args.extend(Self::date_args(range));

        let accounts = parse_balances(&self.run(&args)?)?;
        debug!(count = accounts.len(), "parsed account balances");
        Ok(accounts)
    }

    fn transactions(&self, range: Option<&DateRange>) -> MintedResult<Vec<Transaction>> {
        let mut args = vec!["print".to_string(), "-O".to_string(), "json".to_string()];
        args.extend(Self::date_args(range));

        let transactions = parse_transactions(&self.run(&args)?)?;
        debug!(count = transactions.len(), "parsed transactions");
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountKind;

    const PRINT_JSON: &str = r#"[
      {
        "tdate": "2024-01-15",
        "tdescription": "Grocery run",
        "tstatus": "Unmarked",
        "tpostings": [
          {
            "paccount": "expenses:Groceries",
            "pamount": [
              {"acommodity": "$", "aquantity": {"decimalMantissa": 4250, "decimalPlaces": 2, "floatingPoint": 42.5}},
              {"acommodity": "EUR", "aquantity": {"decimalMantissa": 1, "decimalPlaces": 0, "floatingPoint": 1}}
            ],
            "pcomment": "weekly\n"
          },
          {
            "paccount": "assets:Checking",
            "pamount": [
              {"acommodity": "$", "aquantity": {"decimalMantissa": -4250, "decimalPlaces": 2, "floatingPoint": -42.5}}
            ],
            "pcomment": ""
          },
          {
            "paccount": "equity:rounding",
            "pamount": []
          }
        ]
      }
    ]"#;

    const BALANCE_JSON: &str = r#"[
      [
        ["assets:Checking", "assets:Checking", 0,
          [{"acommodity": "$", "aquantity": {"decimalMantissa": 150000, "decimalPlaces": 2, "floatingPoint": 1500}}]],
        ["liabilities:Card", "liabilities:Card", 0,
          [{"acommodity": "$", "aquantity": {"decimalMantissa": -3000, "decimalPlaces": 2, "floatingPoint": -30}}]],
        ["expenses:Unused", "expenses:Unused", 0, []]
      ],
      [{"acommodity": "$", "aquantity": {"decimalMantissa": 147000, "decimalPlaces": 2, "floatingPoint": 1470}}]
    ]"#;

    #[test]
    fn test_parse_transactions_uses_first_amount() {
        let txns = parse_transactions(PRINT_JSON.as_bytes()).unwrap();
        assert_eq!(txns.len(), 1);

        let txn = &txns[0];
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(txn.description, "Grocery run");
        assert_eq!(txn.postings.len(), 3);
        assert_eq!(txn.postings[0].amount, 42.5);
        assert_eq!(txn.postings[0].kind(), &AccountKind::Expenses);
        assert_eq!(txn.postings[0].comment, "weekly\n");
        assert_eq!(txn.postings[1].amount, -42.5);
        assert_eq!(txn.postings[2].amount, 0.0);
    }

    #[test]
    fn test_parse_balances() {
        let accounts = parse_balances(BALANCE_JSON.as_bytes()).unwrap();
        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts[0].name, "assets:Checking");
        assert_eq!(accounts[0].balance, 1500.0);
        assert_eq!(accounts[0].currency, "$");
        assert_eq!(accounts[1].kind(), &AccountKind::Liabilities);
        assert_eq!(accounts[2].balance, 0.0);
        assert_eq!(accounts[2].currency, "");
    }

    #[test]
    fn test_malformed_payload_is_upstream_error() {
        let err = parse_transactions(b"{not json").unwrap_err();
        assert!(matches!(err, MintedError::Upstream(_)));

        let negative_scale = r#"[{"tdate": "2024-01-01", "tpostings": [
            {"paccount": "expenses:X", "pamount": [{"acommodity": "$", "aquantity": {"decimalMantissa": 1, "decimalPlaces": -2}}]}
        ]}]"#;
        let err = parse_transactions(negative_scale.as_bytes()).unwrap_err();
        assert!(matches!(err, MintedError::Upstream(_)));

        let huge_scale = r#"[{"tdate": "2024-01-01", "tpostings": [
            {"paccount": "expenses:X", "pamount": [{"acommodity": "$", "aquantity": {"decimalMantissa": 1, "decimalPlaces": 2147483648}}]}
        ]}]"#;
        let err = parse_transactions(huge_scale.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid decimalPlaces 2147483648"));
    }

    #[test]
    fn test_missing_binary_is_upstream_error() {
        let cli = HledgerCli::new("/nonexistent/journal.journal")
            .with_binary("/nonexistent/bin/hledger-minted-test");
        let err = cli.transactions(None).unwrap_err();
        assert!(matches!(err, MintedError::Upstream(_)));
    }

    #[test]
    fn test_date_args() {
        let range = DateRange::parse("2024-01-01", "2024-07-01").unwrap();
        assert_eq!(
            HledgerCli::date_args(Some(&range)),
            vec!["-b", "2024-01-01", "-e", "2024-07-01"]
        );
        assert!(HledgerCli::date_args(None).is_empty());
    }
}
