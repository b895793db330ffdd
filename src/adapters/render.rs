use crate::domain::model::{
    CostKpis, DashboardSnapshot, InvestmentBreakdown, Metric, ScalarKpis, SeriesKind, SeriesRow,
};
use crate::domain::ports::Renderer;

/// Collects one cycle's render calls into a `DashboardSnapshot`; the unit
/// the exporter consumes and the natural test double.
#[derive(Debug, Default)]
pub struct SnapshotRenderer {
    snapshot: DashboardSnapshot,
}

impl SnapshotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_snapshot(self) -> DashboardSnapshot {
        self.snapshot
    }
}

impl Renderer for SnapshotRenderer {
    fn render_kpis(&mut self, kpis: &ScalarKpis) {
        self.snapshot.kpis = kpis.clone();
    }

    fn render_investment(&mut self, breakdown: &InvestmentBreakdown, rows: &[SeriesRow]) {
        self.snapshot.investment = *breakdown;
        self.snapshot
            .series
            .insert(SeriesKind::Investment, rows.to_vec());
    }

    fn render_series(&mut self, kind: SeriesKind, rows: &[SeriesRow]) {
        self.snapshot.series.insert(kind, rows.to_vec());
    }

    fn render_cost_kpis(&mut self, cost: &CostKpis) {
        self.snapshot.cost = *cost;
    }
}

fn rows_for(snapshot: &DashboardSnapshot, kind: SeriesKind) -> &[SeriesRow] {
    snapshot.series.get(&kind).map_or(&[], Vec::as_slice)
}

/// Replays a collected snapshot into another renderer, preserving the
/// engine's dependency order.
pub fn replay<R: Renderer>(snapshot: &DashboardSnapshot, renderer: &mut R) {
    renderer.render_kpis(&snapshot.kpis);
    renderer.render_investment(
        &snapshot.investment,
        rows_for(snapshot, SeriesKind::Investment),
    );
    renderer.render_series(
        SeriesKind::LeadsDaily,
        rows_for(snapshot, SeriesKind::LeadsDaily),
    );
    renderer.render_cost_kpis(&snapshot.cost);
    renderer.render_series(
        SeriesKind::SalesDaily,
        rows_for(snapshot, SeriesKind::SalesDaily),
    );
    renderer.render_series(
        SeriesKind::CplDaily,
        rows_for(snapshot, SeriesKind::CplDaily),
    );
}

/// Prints a text rendition of the dashboard to stdout. Locale-aware
/// formatting stays out of scope; values print with two decimals.
#[derive(Debug, Default)]
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self
    }

    fn print_series_line(kind: SeriesKind, rows: &[SeriesRow]) {
        match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => println!(
                "  {:<12} {} points ({} .. {})",
                kind.key(),
                rows.len(),
                first.date,
                last.date
            ),
            _ => println!("  {:<12} no data", kind.key()),
        }
    }
}

impl Renderer for ConsoleRenderer {
    fn render_kpis(&mut self, kpis: &ScalarKpis) {
        println!("KPIs");
        println!("  CAC (day/month/range)  {:.2} / {:.2} / {:.2}", kpis.cac_daily, kpis.cac_month, kpis.cac_range);
        println!("  sales today/month      {:.0} / {:.0}", kpis.sales_today, kpis.sales_month);
        println!("  plans monthly/annual   {:.0} / {:.0}", kpis.monthly_plans, kpis.annual_plans);
        println!("  subscribers            {:.0}", kpis.total_subscribers);
        println!("  conversion             {:.2}%", kpis.conversion_pct);
        println!("  CTR / goal             {:.2}% / {:.2}%", kpis.ctr_pct, kpis.goal_pct);
        println!("  leads                  {:.0}", kpis.total_leads);
    }

    fn render_investment(&mut self, breakdown: &InvestmentBreakdown, rows: &[SeriesRow]) {
        println!("Investment");
        println!("  meta                   {:.2}", breakdown.facebook_total);
        println!("  google                 {:.2}", breakdown.google_total);
        println!("  total                  {:.2}", breakdown.total);
        Self::print_series_line(SeriesKind::Investment, rows);
    }

    fn render_series(&mut self, kind: SeriesKind, rows: &[SeriesRow]) {
        Self::print_series_line(kind, rows);
    }

    fn render_cost_kpis(&mut self, cost: &CostKpis) {
        println!("Cost KPIs");
        // CPL and CPC fall back to zero, CPM shows a dash; the same
        // presentation the dashboard widgets use.
        println!("  cost per lead          {:.2}", cost.cost_per_lead.or_zero());
        println!("  cost per click         {:.2}", cost.cost_per_click.or_zero());
        match cost.cost_per_mille {
            Metric::Value(v) => println!("  cost per mille         {:.2}", v),
            Metric::NotComputable => println!("  cost per mille         –"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn one_row(date: &str) -> Vec<SeriesRow> {
        vec![SeriesRow {
            date: date.to_string(),
            values: BTreeMap::new(),
        }]
    }

    #[test]
    fn test_snapshot_renderer_collects_everything() {
        let mut renderer = SnapshotRenderer::new();

        renderer.render_kpis(&ScalarKpis {
            total_leads: 10.0,
            ..Default::default()
        });
        renderer.render_investment(
            &InvestmentBreakdown {
                facebook_total: 100.0,
                google_total: 50.0,
                total: 150.0,
            },
            &one_row("2024-01-01"),
        );
        renderer.render_series(SeriesKind::LeadsDaily, &one_row("2024-01-02"));
        renderer.render_cost_kpis(&CostKpis {
            cost_per_lead: Metric::Value(15.0),
            ..Default::default()
        });

        let snapshot = renderer.into_snapshot();
        assert_eq!(snapshot.kpis.total_leads, 10.0);
        assert_eq!(snapshot.investment.total, 150.0);
        assert_eq!(snapshot.series[&SeriesKind::Investment][0].date, "2024-01-01");
        assert_eq!(snapshot.series[&SeriesKind::LeadsDaily][0].date, "2024-01-02");
        assert_eq!(snapshot.cost.cost_per_lead, Metric::Value(15.0));
    }

    #[test]
    fn test_replay_preserves_dependency_order() {
        struct OrderProbe(Vec<&'static str>);

        impl Renderer for OrderProbe {
            fn render_kpis(&mut self, _: &ScalarKpis) {
                self.0.push("kpis");
            }
            fn render_investment(&mut self, _: &InvestmentBreakdown, _: &[SeriesRow]) {
                self.0.push("investment");
            }
            fn render_series(&mut self, kind: SeriesKind, _: &[SeriesRow]) {
                self.0.push(kind.key());
            }
            fn render_cost_kpis(&mut self, _: &CostKpis) {
                self.0.push("cost");
            }
        }

        let mut probe = OrderProbe(Vec::new());
        replay(&DashboardSnapshot::default(), &mut probe);

        assert_eq!(
            probe.0,
            vec![
                "kpis",
                "investment",
                "leads_daily",
                "cost",
                "sales_daily",
                "cpl_daily"
            ]
        );
    }
}
