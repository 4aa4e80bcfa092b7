//! DocShield demo entry point.
//!
//! Seeds an in-memory store, then runs every operation once through the
//! boundary facade and logs what came back.

use std::sync::Arc;

use docshield_service::{
    init_tracing, ApiError, ApiResult, DocumentApi, DocumentRequest, DocumentService,
    InMemoryStorage, Level1ItemRequest, Level2ItemRequest, ServiceConfig, TelemetryConfig,
};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::from_env();
    init_tracing(&telemetry_config)?;

    let config = ServiceConfig::from_env().map_err(|e| {
        ApiError::with_message(docshield_service::ErrorKind::Internal, e.to_string())
    })?;
    let service = Arc::new(DocumentService::new(InMemoryStorage::new(), config));
    let api = DocumentApi::new(service);

    let mut ids = Vec::new();
    for n in 0..12 {
        let created = api.create(demo_request(n)).await?;
        ids.push(created.id);
    }
    tracing::info!(count = ids.len(), "seeded documents");

    let page = api.find_all(Some(5), Some(2)).await?;
    tracing::info!(returned = page.len(), "listed page");

    let first = &ids[0];
    let document = api.find_by_id(first).await?;
    let _ = api.find_by_id(first).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&document).unwrap_or_default()
    );

    let mut edited = document;
    edited.title = "Quarterly report (revised)".to_string();
    api.update(edited).await?;
    tracing::info!(title = %api.find_by_id(first).await?.title, "updated document");

    api.delete(first).await?;
    match api.find_by_id(first).await {
        Err(err) => tracing::info!(status = err.status_code(), error = %err, "deleted document is gone"),
        Ok(_) => tracing::warn!("deleted document still readable"),
    }

    let stats = api.service().cache_stats();
    tracing::info!(
        hits = stats.hits,
        misses = stats.misses,
        entries = stats.entry_count,
        hit_rate = stats.hit_rate(),
        "cache statistics"
    );
    Ok(())
}

fn demo_request(n: i64) -> DocumentRequest {
    DocumentRequest {
        title: format!("Quarterly report #{n}"),
        description: "internal notes, not for readers".to_string(),
        level1: (0..3)
            .map(|i| Level1ItemRequest {
                sort: (n + i) % 4,
                name: format!("section {i}"),
                level2: vec![Level2ItemRequest {
                    code: format!("S{n}-{i}"),
                    value: "confidential".to_string(),
                }],
            })
            .collect(),
    }
}
