pub mod coerce;
pub mod cycle;
pub mod metrics;
pub mod resolve;
pub mod series;

pub use crate::domain::cancel::CancelToken;
pub use crate::domain::model::{
    CostKpis, DashboardSnapshot, DateRange, InvestmentBreakdown, Metric, MoneyConvention,
    RawResponse, ScalarKpis, SeriesKind, SeriesRow, Totals,
};
pub use crate::domain::ports::{ConfigProvider, DashSource, Renderer, Storage};
pub use crate::utils::error::Result;
