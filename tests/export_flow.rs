// tests/export_flow.rs
//! The export workflow end to end, with a scripted workspace, scripted
//! enrichment and an in-memory store.

mod common;

use common::*;
use notion2blog::enrichment::{DisabledEnricher, SeoEnricher, SeoSuggestion};
use notion2blog::export::{
    ExportOrchestrator, ExportRequest, ExportStore, MemoryExportStore, Plan, StaticAuthenticator,
};
use notion2blog::output::{plan_delivery, ArtifactFormat, DeliveryOptions, DeliveryTarget};
use notion2blog::types::UserId;
use notion2blog::AppError;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Returns a fixed suggestion and remembers what it was asked.
struct ScriptedEnricher {
    suggestion: SeoSuggestion,
    seen_titles: Mutex<Vec<String>>,
}

impl ScriptedEnricher {
    fn new(title: &str, description: &str, slug: Option<&str>) -> Self {
        Self {
            suggestion: SeoSuggestion {
                title: Some(title.to_string()),
                description: Some(description.to_string()),
                slug: slug.map(str::to_string),
            },
            seen_titles: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl SeoEnricher for ScriptedEnricher {
    async fn suggest(&self, title: &str, html: &str) -> Result<SeoSuggestion, AppError> {
        assert!(html.contains("<h1>"));
        self.seen_titles.lock().push(title.to_string());
        Ok(self.suggestion.clone())
    }
}

fn writer() -> UserId {
    UserId::new("writer").unwrap()
}

fn workspace() -> FakeNotion {
    FakeNotion::new().with_page(page("Launch Plan", Some("🚀"))).publish(
        &page_id(),
        vec![
            heading2("Goals"),
            bulleted("Ship v1"),
            bulleted("Write docs"),
            paragraph("See you there."),
        ],
    )
}

struct Harness {
    notion: Arc<FakeNotion>,
    store: Arc<MemoryExportStore>,
    orchestrator: ExportOrchestrator,
}

fn harness(notion: FakeNotion, plan: Plan, enricher: Arc<dyn SeoEnricher>) -> Harness {
    let notion = Arc::new(notion);
    let store = Arc::new(MemoryExportStore::new());
    let orchestrator = ExportOrchestrator::new(
        notion.clone(),
        Arc::new(StaticAuthenticator::new(writer(), plan)),
        enricher,
        store.clone(),
    )
    .with_fetch_concurrency(2);
    Harness {
        notion,
        store,
        orchestrator,
    }
}

#[tokio::test]
async fn enriched_export_is_stored_and_returned() {
    let enricher = Arc::new(ScriptedEnricher::new(
        "Launch Plan: Goals for v1",
        "What we ship and when.",
        Some("Launch Plan v1"),
    ));
    let h = harness(workspace(), Plan::Free, enricher.clone());

    let completed = h
        .orchestrator
        .export(ExportRequest::new(PAGE_URL))
        .await
        .unwrap();
    let receipt = completed.receipt();

    assert_eq!(receipt.title, "Launch Plan: Goals for v1");
    assert_eq!(receipt.description, "What we ship and when.");
    assert_eq!(receipt.slug, "launch-plan-v1");
    assert!(completed.enriched);
    assert_eq!(enricher.seen_titles.lock().clone(), vec!["Launch Plan"]);

    let html = &completed.export.html_content;
    assert!(html.starts_with("<style>"));
    assert!(html.contains("🚀</div>\n<h1>Launch Plan</h1>\n<h2 id=\"goals\">Goals</h2>\n<ul>\n<li>Ship v1</li>\n<li>Write docs</li>\n</ul>\n<p>See you there.</p>\n"));
    assert_eq!(receipt.html, *html);

    let markdown = completed.export.markdown_content.as_deref().unwrap();
    assert!(markdown.contains("slug: \"launch-plan-v1\""));
    assert!(markdown.contains("- Ship v1\n- Write docs\n"));

    assert_eq!(completed.tree.total_blocks, 4);
    assert_eq!(h.store.len(), 1);
    let stored = h.store.get(&receipt.id).await.unwrap();
    assert_eq!(stored, completed.export);

    let json = serde_json::to_value(&receipt).unwrap();
    assert!(json.get("createdAt").is_some());
}

#[tokio::test]
async fn failed_enrichment_falls_back_to_the_title() {
    let h = harness(workspace(), Plan::Basic, Arc::new(DisabledEnricher));

    let completed = h
        .orchestrator
        .export(ExportRequest::new(PAGE_URL))
        .await
        .unwrap();

    assert!(!completed.enriched);
    assert_eq!(completed.export.title, "Launch Plan");
    assert_eq!(completed.export.frontmatter.description, "Launch Plan");
    assert_eq!(completed.export.frontmatter.slug, "launch-plan");
}

#[tokio::test]
async fn invalid_url_is_rejected_before_any_request() {
    let h = harness(workspace(), Plan::Pro, Arc::new(DisabledEnricher));

    let err = h
        .orchestrator
        .export(ExportRequest::new("https://example.com/blog/post"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidNotionUrl(_)));
    assert_eq!(err.to_string(), "Invalid Notion URL format");
    assert_eq!(*h.notion.page_requests.lock(), 0);
    assert_eq!(h.notion.listing_count(), 0);
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn empty_url_is_a_validation_error() {
    let h = harness(workspace(), Plan::Pro, Arc::new(DisabledEnricher));
    let err = h
        .orchestrator
        .export(ExportRequest::new("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m == "Notion URL is required"));
}

#[tokio::test]
async fn unshared_page_aborts_without_fetching_blocks() {
    let notion = FakeNotion::new().publish(&page_id(), vec![paragraph("secret")]);
    let h = harness(notion, Plan::Pro, Arc::new(DisabledEnricher));

    let err = h
        .orchestrator
        .export(ExportRequest::new(PAGE_URL))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::PageUnavailable { .. }));
    assert_eq!(
        err.to_string(),
        "Failed to fetch Notion page. Make sure the page is shared with your integration."
    );
    assert_eq!(h.notion.listing_count(), 0);
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn free_plan_quota_is_enforced() {
    let h = harness(workspace(), Plan::Free, Arc::new(DisabledEnricher));

    for _ in 0..5 {
        h.orchestrator
            .export(ExportRequest::new(PAGE_URL))
            .await
            .unwrap();
    }
    let err = h
        .orchestrator
        .export(ExportRequest::new(PAGE_URL))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::QuotaExceeded {
            limit: 5,
            used: 5,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Export limit reached. Please upgrade your plan.");
    assert_eq!(h.store.len(), 5);
    assert_eq!(*h.notion.page_requests.lock(), 5);
}

#[tokio::test]
async fn wrong_token_is_unauthorized() {
    let notion = Arc::new(workspace());
    let store = Arc::new(MemoryExportStore::new());
    let orchestrator = ExportOrchestrator::new(
        notion.clone(),
        Arc::new(StaticAuthenticator::new(writer(), Plan::Pro).with_required_token("s3cret")),
        Arc::new(DisabledEnricher),
        store.clone(),
    );

    let err = orchestrator
        .export(ExportRequest::new(PAGE_URL).with_credentials("guess"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
    assert_eq!(*notion.page_requests.lock(), 0);

    orchestrator
        .export(ExportRequest::new(PAGE_URL).with_credentials("s3cret"))
        .await
        .unwrap();
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn exports_are_listed_newest_first_and_deleted_by_owner() {
    let h = harness(workspace(), Plan::Pro, Arc::new(DisabledEnricher));
    let first = h
        .orchestrator
        .export(ExportRequest::new(PAGE_URL))
        .await
        .unwrap();
    let second = h
        .orchestrator
        .export(ExportRequest::new(PAGE_URL))
        .await
        .unwrap();

    let listed = h.store.list_for_user(&writer()).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed[0].created_at >= listed[1].created_at);

    let stranger = UserId::new("stranger").unwrap();
    assert!(matches!(
        h.store.get_for_user(&stranger, &first.export.id).await,
        Err(AppError::ExportNotFound(_))
    ));
    assert_eq!(
        h.store.get_for_user(&writer(), &first.export.id).await.unwrap(),
        first.export
    );
    assert!(matches!(
        h.store.delete(&stranger, &first.export.id).await,
        Err(AppError::ExportNotFound(_))
    ));
    h.store.delete(&writer(), &first.export.id).await.unwrap();
    assert_eq!(h.store.len(), 1);
    assert!(h.store.get(&second.export.id).await.is_ok());
}

#[tokio::test]
async fn stored_export_plans_both_artifacts() {
    let h = harness(workspace(), Plan::Pro, Arc::new(DisabledEnricher));
    let completed = h
        .orchestrator
        .export(ExportRequest::new(PAGE_URL))
        .await
        .unwrap();

    let options = DeliveryOptions {
        output_dir: Some("site/posts".into()),
        format: ArtifactFormat::Both,
        standalone_document: true,
        ..Default::default()
    };
    let plan = plan_delivery(&completed.export, &options).unwrap();

    let paths: Vec<String> = plan
        .targets
        .iter()
        .filter_map(|t| match t {
            DeliveryTarget::WriteFile { path, .. } => Some(path.display().to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(paths, vec!["site/posts/launch-plan.html", "site/posts/launch-plan.md"]);

    let DeliveryTarget::WriteFile { content, .. } = &plan.targets[0] else {
        panic!("expected a file target");
    };
    assert!(content.contains("<title>Launch Plan</title>"));
    assert!(content.contains("<meta name=\"description\" content=\"Launch Plan\" />"));
}
