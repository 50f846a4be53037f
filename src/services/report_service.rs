use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::models::{
    CardSize, LayoutUpdateRequest, Report, ReportCardPreview, ReportConfig, ReportLayout,
    ReportPreview, ReportRequest,
};
use crate::services::{DataCardService, EntityStore, layout};
use crate::utils::{ApiError, ApiResult, is_permutation};

pub struct ReportService {
    store: EntityStore<Report>,
    data_cards: Arc<DataCardService>,
}

impl ReportService {
    pub fn new(seed: Vec<Report>, data_cards: Arc<DataCardService>) -> Self {
        Self { store: EntityStore::new(seed), data_cards }
    }

    pub async fn list(&self) -> Vec<Report> {
        self.store.list().await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Report> {
        self.store.get(id).await
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }

    pub async fn create(&self, req: ReportRequest) -> ApiResult<Report> {
        let req = req.normalized();
        req.validate()?;
        let config = req.build_config();

        let now = Utc::now();
        let created = self
            .store
            .insert_with(|id| Report {
                id,
                name: req.name,
                report_type: req.report_type,
                data_card_ids: req.data_card_ids,
                config,
                description: req.description,
                created_at: now,
                updated_at: now,
            })
            .await;

        tracing::info!(
            "Report created: {} with {} cards (ID: {})",
            created.name,
            created.data_card_ids.len(),
            created.id
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, req: ReportRequest) -> ApiResult<Report> {
        let req = req.normalized();
        req.validate()?;
        let config = req.build_config();

        let updated = self
            .store
            .update_by_id(id, |current| {
                Ok(Report {
                    id: current.id,
                    name: req.name,
                    report_type: req.report_type,
                    data_card_ids: req.data_card_ids,
                    config,
                    description: req.description,
                    created_at: current.created_at,
                    updated_at: Utc::now(),
                })
            })
            .await?;

        tracing::info!("Report updated: ID {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let removed = self.store.remove_by_id(id).await?;
        tracing::info!("Report deleted: {} (ID: {})", removed.name, id);
        Ok(())
    }

    pub async fn layout(&self, id: i64) -> ApiResult<ReportLayout> {
        let report = self.store.get(id).await?;
        let cards: Vec<(i64, CardSize)> = report
            .data_card_ids
            .iter()
            .map(|card_id| (*card_id, report.card_size(*card_id)))
            .collect();
        let (columns, placements) = layout::arrange(&cards);

        Ok(ReportLayout { report_id: report.id, layout: report.config.layout, columns, placements })
    }

    /// Store a new card order and sizes, then return the resulting arrangement
    pub async fn update_layout(&self, id: i64, req: LayoutUpdateRequest) -> ApiResult<ReportLayout> {
        self.store
            .update_by_id(id, |current| {
                if !is_permutation(&current.data_card_ids, &req.data_card_ids) {
                    return Err(ApiError::validation_error(
                        "Card order must contain exactly the report's cards",
                    ));
                }
                let card_sizes = req
                    .card_sizes
                    .iter()
                    .filter(|(card_id, _)| req.data_card_ids.contains(card_id))
                    .map(|(card_id, size)| (*card_id, *size))
                    .collect();
                Ok(Report {
                    data_card_ids: req.data_card_ids.clone(),
                    config: ReportConfig { card_sizes, ..current.config.clone() },
                    updated_at: Utc::now(),
                    ..current.clone()
                })
            })
            .await?;

        tracing::info!("Report layout updated: ID {}", id);
        self.layout(id).await
    }

    pub async fn preview(&self, id: i64) -> ApiResult<ReportPreview> {
        let report = self.store.get(id).await?;

        let mut cards = Vec::new();
        for card_id in &report.data_card_ids {
            if let Some(card) = self.data_cards.find(*card_id).await {
                cards.push(ReportCardPreview {
                    id: card.id,
                    name: card.name,
                    type_label: card.card_type.label().to_string(),
                    placeholder: card.card_type.placeholder_text().to_string(),
                });
            }
        }

        let note = if report.data_card_ids.is_empty() {
            Some("This report has no data cards".to_string())
        } else if cards.is_empty() {
            Some("The selected data cards no longer exist".to_string())
        } else {
            None
        };

        Ok(ReportPreview {
            id: report.id,
            name: report.name,
            description: report.description.unwrap_or_else(|| "No description".to_string()),
            type_label: report.report_type.label().to_string(),
            layout: report.config.layout,
            card_count: report.data_card_ids.len(),
            cards,
            note,
            created_at: report.created_at,
        })
    }
}
