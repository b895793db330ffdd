use crate::core::metrics::{derive_cost_kpis, extract_kpis, investment_breakdown, sum_field};
use crate::core::series::{collect_series, SeriesSpec};
use crate::domain::cancel::CancelToken;
use crate::domain::model::{DateRange, MoneyConvention, SeriesKind, Totals};
use crate::domain::ports::{DashSource, Renderer};
use crate::utils::error::{DashError, Result};
use std::sync::Mutex;

/// State owned by exactly one refresh cycle. Totals accumulate here as the
/// series are processed and never leak into the next cycle.
#[derive(Debug)]
pub struct CycleContext {
    pub range: DateRange,
    pub convention: MoneyConvention,
    pub totals: Totals,
    cancel: CancelToken,
}

impl CycleContext {
    fn new(range: DateRange, convention: MoneyConvention, cancel: CancelToken) -> Self {
        Self {
            range,
            convention,
            totals: Totals::default(),
            cancel,
        }
    }

    /// Checked before every render step; a superseded cycle stops here.
    fn check(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            Err(DashError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Drives the fetch-and-render cycle: one cycle at a time owns the output,
/// and starting a new one cancels whatever is still in flight.
pub struct DashEngine<S: DashSource> {
    source: S,
    convention: MoneyConvention,
    current: Mutex<Option<CancelToken>>,
}

impl<S: DashSource> DashEngine<S> {
    pub fn new(source: S, convention: MoneyConvention) -> Self {
        Self {
            source,
            convention,
            current: Mutex::new(None),
        }
    }

    fn begin_cycle(&self) -> CancelToken {
        let mut slot = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = slot.take() {
            previous.cancel();
        }
        let token = CancelToken::new();
        *slot = Some(token.clone());
        token
    }

    /// Runs one full cycle against the given renderer. Render calls happen
    /// in dependency order: scalar KPIs, investment, leads, the cost KPIs
    /// that combine both, then the remaining series. Returns
    /// `DashError::Cancelled` when a newer cycle superseded this one; no
    /// partial output has been rendered past the point of cancellation.
    pub async fn refresh<R: Renderer>(&self, range: DateRange, renderer: &mut R) -> Result<()> {
        let token = self.begin_cycle();

        tracing::info!(
            entry_start = %range.entry_start,
            entry_end = %range.entry_end,
            "starting refresh cycle"
        );

        let raw = self.source.fetch(&range, &token).await?;

        let mut ctx = CycleContext::new(range, self.convention, token);

        // A stale response that arrives after supersession is discarded
        // before anything renders.
        ctx.check()?;

        let kpis = extract_kpis(&raw);
        renderer.render_kpis(&kpis);

        let investment = collect_series(
            &raw,
            SeriesSpec::for_kind(SeriesKind::Investment),
            ctx.convention,
        );
        let breakdown = investment_breakdown(&investment);
        ctx.totals.investment_total = breakdown.total;
        ctx.check()?;
        renderer.render_investment(&breakdown, &investment);

        let leads = collect_series(
            &raw,
            SeriesSpec::for_kind(SeriesKind::LeadsDaily),
            ctx.convention,
        );
        // Leads total comes from the series itself; the pre-aggregated KPI
        // only backfills payloads that ship no daily rows. Clicks and
        // impressions have no series and always come from the KPIs.
        ctx.totals.leads_total = if leads.is_empty() {
            kpis.total_leads
        } else {
            sum_field(&leads, "leads_count")
        };
        ctx.totals.clicks_total = kpis.clicks_total;
        ctx.totals.impressions_total = kpis.impressions_total;
        ctx.check()?;
        renderer.render_series(SeriesKind::LeadsDaily, &leads);

        // Both source totals are in place now.
        let cost = derive_cost_kpis(&ctx.totals);
        ctx.check()?;
        renderer.render_cost_kpis(&cost);

        for kind in [SeriesKind::SalesDaily, SeriesKind::CplDaily] {
            let rows = collect_series(&raw, SeriesSpec::for_kind(kind), ctx.convention);
            ctx.check()?;
            renderer.render_series(kind, &rows);
        }

        tracing::debug!(
            investment_total = ctx.totals.investment_total,
            leads_total = ctx.totals.leads_total,
            "refresh cycle complete"
        );
        Ok(())
    }
}
