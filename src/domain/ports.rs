use crate::domain::cancel::CancelToken;
use crate::domain::model::{
    CostKpis, DateRange, InvestmentBreakdown, MoneyConvention, RawResponse, ScalarKpis,
    SeriesKind, SeriesRow,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Transport seam. Implementations own request mechanics and must honor the
/// cancel token; the engine never sees partial responses.
#[async_trait]
pub trait DashSource: Send + Sync {
    async fn fetch(&self, range: &DateRange, cancel: &CancelToken) -> Result<RawResponse>;
}

/// Output capability. The engine invokes these in dependency order within a
/// cycle: KPIs, investment, leads, cost KPIs, then the remaining series.
/// Implementations never feed back into the pipeline.
pub trait Renderer: Send {
    fn render_kpis(&mut self, kpis: &ScalarKpis);
    fn render_investment(&mut self, breakdown: &InvestmentBreakdown, rows: &[SeriesRow]);
    fn render_series(&mut self, kind: SeriesKind, rows: &[SeriesRow]);
    fn render_cost_kpis(&mut self, cost: &CostKpis);
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn money_convention(&self) -> MoneyConvention;
    fn timeout_seconds(&self) -> Option<u64>;
    fn headers(&self) -> Option<&HashMap<String, String>>;
    fn parameters(&self) -> Option<&HashMap<String, String>>;
}
