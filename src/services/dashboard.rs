//! Dashboard service
//!
//! Entry point for every report. Without a date range a report is read from
//! the installed snapshot; with one, the ledger is re-queried for that range
//! and the report is recomputed on the spot. Both paths run the same
//! [`ReportContext`] pipeline. The filtered path never touches the cache.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::cache::{CacheStatus, CachedSnapshot, SnapshotCache};
use crate::config::Settings;
use crate::error::MintedResult;
use crate::ledger::LedgerSource;
use crate::models::{AccountBalance, DateRange, Transaction};
use crate::reports::{
    self, AccountDetail, BudgetHistoryItem, BudgetItem, CategoryDetail, CategorySpending,
    CategoryTrend, IncomeDetail, MonthlyMetrics, NetWorthPoint, ReportBundle, ReportContext,
    Summary, TierDetail, YearOverYear,
};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Service for report queries and cache management
pub struct DashboardService {
    ledger: Arc<dyn LedgerSource>,
    cache: SnapshotCache,
    clock: Clock,
}

impl DashboardService {
    pub fn new(ledger: Arc<dyn LedgerSource>, settings: Settings) -> Self {
        Self {
            ledger,
            cache: SnapshotCache::new(settings),
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the wall clock, which decides the current month
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    // === Cache ===

    /// Recompute every report and install the result.
    ///
    /// Fails with `RefreshInProgress` when another rebuild is running. On any
    /// other failure the previous snapshot stays installed.
    pub fn rebuild_cache(&self) -> MintedResult<Arc<CachedSnapshot>> {
        let guard = self.cache.begin_rebuild().map_err(|e| {
            if e.is_refresh_in_progress() {
                warn!("Refused cache rebuild: another rebuild is running");
            }
            e
        })?;

        info!("Rebuilding report cache");
        let started = Instant::now();

        let ctx = self
            .context(Arc::clone(guard.settings()), None, None)
            .map_err(|e| {
                warn!(error = %e, "Cache rebuild failed");
                e
            })?;
        let bundle = ReportBundle::build(&ctx);
        let snapshot = guard.install(bundle, self.now())?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            transactions = ctx.transactions.len(),
            stale = snapshot.stale,
            "Report cache rebuilt"
        );
        Ok(snapshot)
    }

    pub fn cache_status(&self) -> MintedResult<CacheStatus> {
        self.cache.status()
    }

    pub fn snapshot(&self) -> MintedResult<Arc<CachedSnapshot>> {
        self.cache.snapshot()
    }

    // === Settings ===

    pub fn settings(&self) -> MintedResult<Arc<Settings>> {
        self.cache.settings()
    }

    /// Apply new settings; the installed snapshot is kept but marked stale
    pub fn update_settings(&self, settings: Settings) -> MintedResult<()> {
        self.cache.update_settings(settings)?;
        info!("Settings updated; report cache marked stale");
        Ok(())
    }

    // === Pipeline ===

    /// Query the ledger and build a context.
    ///
    /// `accounts_range` differs from `range` only for detail views, which
    /// check entity names against every known account.
    fn context(
        &self,
        settings: Arc<Settings>,
        range: Option<DateRange>,
        accounts_range: Option<DateRange>,
    ) -> MintedResult<ReportContext> {
        let accounts = self.ledger.accounts(accounts_range.as_ref())?;
        let transactions = self.ledger.transactions(range.as_ref())?;
        debug!(
            accounts = accounts.len(),
            transactions = transactions.len(),
            range = ?range.map(|r| r.to_string()),
            "Fetched ledger data"
        );
        Ok(ReportContext::new(
            transactions,
            accounts,
            settings,
            self.today(),
            range,
        ))
    }

    fn report<T>(
        &self,
        range: Option<DateRange>,
        cached: impl FnOnce(&ReportBundle) -> T,
        build: impl FnOnce(&ReportContext) -> T,
    ) -> MintedResult<T> {
        match range {
            None => Ok(cached(&*self.cache.snapshot()?.reports)),
            Some(range) => {
                let ctx = self.context(self.settings()?, Some(range), Some(range))?;
                Ok(build(&ctx))
            }
        }
    }

    fn detail<T>(
        &self,
        range: Option<DateRange>,
        build: impl FnOnce(&ReportContext) -> MintedResult<T>,
    ) -> MintedResult<T> {
        let ctx = self.context(self.settings()?, range, None)?;
        build(&ctx)
    }

    // === Reports ===

    pub fn accounts(&self, range: Option<DateRange>) -> MintedResult<Vec<AccountBalance>> {
        self.report(range, |b| b.accounts.clone(), |ctx| ctx.accounts.clone())
    }

    pub fn transactions(&self, range: Option<DateRange>) -> MintedResult<Vec<Transaction>> {
        self.report(range, |b| b.transactions.clone(), |ctx| ctx.transactions.clone())
    }

    pub fn summary(&self, range: Option<DateRange>) -> MintedResult<Summary> {
        self.report(range, |b| b.summary.clone(), reports::summary)
    }

    pub fn budget(&self, range: Option<DateRange>) -> MintedResult<Vec<BudgetItem>> {
        self.report(range, |b| b.budget.clone(), reports::budget_vs_actual)
    }

    pub fn budget_history(&self, range: Option<DateRange>) -> MintedResult<Vec<BudgetHistoryItem>> {
        self.report(range, |b| b.budget_history.clone(), reports::budget_history)
    }

    pub fn income_history(&self, range: Option<DateRange>) -> MintedResult<Vec<BudgetHistoryItem>> {
        self.report(range, |b| b.income_history.clone(), reports::income_history)
    }

    pub fn tier_history(&self, range: Option<DateRange>) -> MintedResult<Vec<BudgetHistoryItem>> {
        self.report(range, |b| b.tier_history.clone(), reports::tier_history)
    }

    pub fn monthly_metrics(&self, range: Option<DateRange>) -> MintedResult<Vec<MonthlyMetrics>> {
        self.report(range, |b| b.monthly_metrics.clone(), reports::monthly_metrics)
    }

    pub fn category_spending(&self, range: Option<DateRange>) -> MintedResult<Vec<CategorySpending>> {
        self.report(range, |b| b.category_spending.clone(), reports::category_spending)
    }

    pub fn income_breakdown(&self, range: Option<DateRange>) -> MintedResult<Vec<CategorySpending>> {
        self.report(range, |b| b.income_breakdown.clone(), reports::income_breakdown)
    }

    pub fn net_worth_over_time(&self, range: Option<DateRange>) -> MintedResult<Vec<NetWorthPoint>> {
        self.report(range, |b| b.net_worth_over_time.clone(), reports::net_worth_over_time)
    }

    pub fn category_trends(&self, range: Option<DateRange>) -> MintedResult<Vec<CategoryTrend>> {
        self.report(range, |b| b.category_trends.clone(), reports::category_trends)
    }

    pub fn year_over_year(&self, range: Option<DateRange>) -> MintedResult<Vec<YearOverYear>> {
        self.report(range, |b| b.year_over_year.clone(), reports::year_over_year)
    }

    // === Details ===

    pub fn category_detail(&self, category: &str, range: Option<DateRange>) -> MintedResult<CategoryDetail> {
        self.detail(range, |ctx| CategoryDetail::generate(ctx, category))
    }

    pub fn tier_detail(&self, tier: &str, range: Option<DateRange>) -> MintedResult<TierDetail> {
        self.detail(range, |ctx| TierDetail::generate(ctx, tier))
    }

    pub fn account_detail(&self, account: &str, range: Option<DateRange>) -> MintedResult<AccountDetail> {
        self.detail(range, |ctx| AccountDetail::generate(ctx, account))
    }

    pub fn income_detail(&self, income: &str, range: Option<DateRange>) -> MintedResult<IncomeDetail> {
        self.detail(range, |ctx| IncomeDetail::generate(ctx, income))
    }
}
