use faq_scraper::{
    viewer::ViewerState, Error, Extractor, FaqParser, FaqRecord, FaqSelectors, FetchError,
    FetchMode, Fetcher, ParseError, RecordStore, WritePolicy,
};
use pretty_assertions::assert_eq;
use std::{
    fs,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

const FAQ_HTML: &str = r#"<div id="faq"><div><h3>Q1</h3><p>A1</p></div><div><h3>Q2</h3><p></p></div></div>"#;

struct CannedFetcher {
    mode: FetchMode,
    html: &'static str,
    calls: Arc<AtomicUsize>,
}

impl CannedFetcher {
    fn boxed(mode: FetchMode, html: &'static str) -> (Box<dyn Fetcher>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = CannedFetcher {
            mode,
            html,
            calls: Arc::clone(&calls),
        };
        (Box::new(fetcher), calls)
    }
}

#[async_trait::async_trait]
impl Fetcher for CannedFetcher {
    fn mode(&self) -> FetchMode {
        self.mode
    }

    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.html.to_string())
    }
}

struct FailingFetcher;

#[async_trait::async_trait]
impl Fetcher for FailingFetcher {
    fn mode(&self) -> FetchMode {
        FetchMode::Static
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: 503,
        })
    }
}

fn parser() -> FaqParser {
    FaqParser::new(&FaqSelectors::default()).unwrap()
}

#[tokio::test]
async fn test_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("faqs.jsonl"));
    let (fetcher, _) = CannedFetcher::boxed(FetchMode::Static, FAQ_HTML);

    let records = Extractor::new(fetcher, parser())
        .run("https://docs.example.com/faq", &store, WritePolicy::Overwrite)
        .await
        .unwrap();
    assert_eq!(
        records,
        vec![FaqRecord::new("Q1", "A1"), FaqRecord::new("Q2", "")]
    );

    let text = fs::read_to_string(store.path()).unwrap();
    assert_eq!(
        text,
        "{\"question\":\"Q1\",\"answer\":\"A1\"}\n{\"question\":\"Q2\",\"answer\":\"\"}\n"
    );

    let mut state = ViewerState::Loading;
    state.finish(store.read_all());
    let sections: Vec<_> = state
        .sections()
        .iter()
        .map(|s| (s.record.question.as_str(), s.expanded))
        .collect();
    assert_eq!(sections, vec![("Q1", false), ("Q2", false)]);
}

#[tokio::test]
async fn test_parse_failure_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("faqs.jsonl"));
    store.replace(&[FaqRecord::new("Old", "Kept")]).unwrap();
    let before = fs::read_to_string(store.path()).unwrap();

    let (fetcher, _) = CannedFetcher::boxed(FetchMode::Static, "<main><h3>Q1</h3><p>A1</p></main>");
    let err = Extractor::new(fetcher, parser())
        .run("https://docs.example.com/faq", &store, WritePolicy::Overwrite)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Parse(ParseError::ContainerMissing(_))));
    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}

#[tokio::test]
async fn test_fetch_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("faqs.jsonl"));

    let err = Extractor::new(Box::new(FailingFetcher), parser())
        .run("https://docs.example.com/faq", &store, WritePolicy::Append)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Fetch(FetchError::HttpStatus { status: 503, .. })
    ));
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_fallback_when_container_missing() {
    let (primary, primary_calls) = CannedFetcher::boxed(FetchMode::Static, "<div id=\"app\"></div>");
    let (fallback, fallback_calls) = CannedFetcher::boxed(FetchMode::Rendered, FAQ_HTML);

    let records = Extractor::new(primary, parser())
        .with_fallback(fallback)
        .extract("https://docs.example.com/faq")
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fallback_after_fetch_error() {
    let (fallback, _) = CannedFetcher::boxed(FetchMode::Rendered, FAQ_HTML);
    let records = Extractor::new(Box::new(FailingFetcher), parser())
        .with_fallback(fallback)
        .extract("https://docs.example.com/faq")
        .await
        .unwrap();
    assert_eq!(records[0], FaqRecord::new("Q1", "A1"));
}

#[tokio::test]
async fn test_no_fallback_when_primary_succeeds() {
    let (primary, _) = CannedFetcher::boxed(FetchMode::Static, FAQ_HTML);
    let (fallback, fallback_calls) = CannedFetcher::boxed(FetchMode::Rendered, FAQ_HTML);

    Extractor::new(primary, parser())
        .with_fallback(fallback)
        .extract("https://docs.example.com/faq")
        .await
        .unwrap();
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_append_policy_accumulates() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("faqs.jsonl"));
    let (fetcher, _) = CannedFetcher::boxed(FetchMode::Static, FAQ_HTML);
    let extractor = Extractor::new(fetcher, parser());

    extractor
        .run("https://docs.example.com/faq", &store, WritePolicy::Append)
        .await
        .unwrap();
    extractor
        .run("https://docs.example.com/faq", &store, WritePolicy::Append)
        .await
        .unwrap();
    assert_eq!(store.read_all().unwrap().len(), 4);

    extractor
        .run("https://docs.example.com/faq", &store, WritePolicy::Overwrite)
        .await
        .unwrap();
    assert_eq!(store.read_all().unwrap().len(), 2);
}
