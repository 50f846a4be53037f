use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::models::{EntityCounts, Overview, RecentItem};
use crate::services::{
    DataCardService, DataSourceService, DimensionService, MetricService, ReportService,
};

const RECENT_LIMIT: usize = 5;

/// Aggregated view over every entity store
pub struct OverviewService {
    data_sources: Arc<DataSourceService>,
    metrics: Arc<MetricService>,
    dimensions: Arc<DimensionService>,
    data_cards: Arc<DataCardService>,
    reports: Arc<ReportService>,
}

impl OverviewService {
    pub fn new(
        data_sources: Arc<DataSourceService>,
        metrics: Arc<MetricService>,
        dimensions: Arc<DimensionService>,
        data_cards: Arc<DataCardService>,
        reports: Arc<ReportService>,
    ) -> Self {
        Self { data_sources, metrics, dimensions, data_cards, reports }
    }

    pub async fn overview(&self) -> Overview {
        let counts = EntityCounts {
            data_sources: self.data_sources.count().await,
            metrics: self.metrics.count().await,
            dimensions: self.dimensions.count().await,
            data_cards: self.data_cards.count().await,
            reports: self.reports.count().await,
        };

        let recent_reports = most_recent(
            self.reports
                .list()
                .await
                .into_iter()
                .map(|r| recent_item(r.id, r.name, r.report_type.label(), r.updated_at))
                .collect(),
        );
        let recent_data_cards = most_recent(
            self.data_cards
                .list()
                .await
                .into_iter()
                .map(|c| recent_item(c.id, c.name, c.card_type.label(), c.updated_at))
                .collect(),
        );

        tracing::debug!("Overview computed: {:?}", counts);
        Overview { counts, recent_reports, recent_data_cards }
    }
}

fn recent_item(id: i64, name: String, type_label: &str, updated_at: DateTime<Utc>) -> RecentItem {
    RecentItem { id, name, type_label: type_label.to_string(), updated_at }
}

/// Newest first; ties keep store order
fn most_recent(mut items: Vec<RecentItem>) -> Vec<RecentItem> {
    items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    items.truncate(RECENT_LIMIT);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_most_recent_keeps_newest_five() {
        let items = (1..=7)
            .map(|i| {
                recent_item(i, format!("r{}", i), "Dashboard", Utc.timestamp_opt(i * 60, 0).unwrap())
            })
            .collect();
        let ids: Vec<i64> = most_recent(items).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }
}
