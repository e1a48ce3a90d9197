// src/crawl/worker.rs
// =============================================================================
// One crawl worker: a loop that pulls links, fetches them and feeds the
// links it finds back into the shared frontier.
//
// The loop is written as an explicit state machine:
//
//   SeekingWork --claimed--> Fetching --ok--> Filtering --> SeekingWork
//        |                      |
//        |                      +--failed--> SeekingWork
//        +--no work--> IdleWait --> SeekingWork
//                          |
//                          +--idle too long AND frontier empty--> Terminated
//
// Each worker keeps its own idle counter and decides on its own when to
// stop. There is no shared "everyone is done" signal: a worker that gives
// up at the exact moment another one pushes new links just leaves that work
// to the others. With a single worker that window does not exist.
//
// Failures never leave this module: a bad fetch is logged, counted and
// skipped. Its link stays committed, so it is not retried.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use super::frontier::{Pop, SharedFrontier};
use super::stats::CrawlStats;
use crate::fetch::{AnchorExtractor, FetchedPage, Fetcher};
use crate::link::{domains_match, normalize_link, Domain};

// Everything the workers of one crawl share
pub struct CrawlContext {
    pub frontier: Arc<SharedFrontier>,
    pub domain: Domain,
    pub fetcher: Arc<dyn Fetcher>,
    pub extractor: Arc<dyn AnchorExtractor>,
    pub stats: Arc<CrawlStats>,
    /// Idle ticks in a row before a worker may stop
    pub idle_threshold: u32,
    /// Length of one idle tick
    pub idle_tick: Duration,
    /// Print every claimed link to stdout
    pub announce: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    SeekingWork,
    Fetching(String),
    Filtering { link: String, page: FetchedPage },
    IdleWait,
    Terminated,
}

pub struct Worker {
    id: usize,
    ctx: Arc<CrawlContext>,
    idle_ticks: u32,
}

impl Worker {
    pub fn new(id: usize, ctx: Arc<CrawlContext>) -> Self {
        Self {
            id,
            ctx,
            idle_ticks: 0,
        }
    }

    // Runs until this worker decides it is done
    pub async fn run(mut self) {
        tracing::debug!("Worker {} started", self.id);

        let mut state = State::SeekingWork;
        loop {
            state = match state {
                State::SeekingWork => self.seek_work(),
                State::Fetching(link) => self.fetch(link).await,
                State::Filtering { link, page } => self.filter(&link, page),
                State::IdleWait => self.idle_wait().await,
                State::Terminated => break,
            };
        }

        self.ctx.stats.record_termination();
        tracing::info!(
            "Worker {} stopped after {} idle tick(s)",
            self.id,
            self.idle_ticks
        );
    }

    fn seek_work(&mut self) -> State {
        match self.ctx.frontier.try_pop() {
            Pop::Claimed(link) => {
                self.idle_ticks = 0;
                self.ctx.stats.record_commit();
                if self.ctx.announce {
                    println!("{}", link);
                }
                State::Fetching(link)
            }
            Pop::AlreadyCommitted(link) => {
                tracing::debug!("Worker {}: {} was already claimed", self.id, link);
                self.ctx.stats.record_duplicate_pop();
                State::IdleWait
            }
            Pop::Empty => State::IdleWait,
        }
    }

    async fn fetch(&mut self, link: String) -> State {
        let link = normalize_link(&link);

        match self.ctx.fetcher.fetch(&link).await {
            Ok(page) => {
                self.ctx.stats.record_fetched();
                State::Filtering { link, page }
            }
            Err(e) => {
                tracing::warn!("Worker {}: skipping {}: {}", self.id, link, e);
                self.ctx.stats.record_fetch_failed();
                State::SeekingWork
            }
        }
    }

    fn filter(&mut self, link: &str, page: FetchedPage) -> State {
        // A redirect that leaves the domain means the body is someone else's page
        if page.final_url != link && !domains_match(&page.final_url, &self.ctx.domain) {
            tracing::debug!(
                "Worker {}: {} redirected off-domain to {}",
                self.id,
                link,
                page.final_url
            );
            self.ctx.stats.record_redirected_off_domain();
            return State::SeekingWork;
        }

        let anchors = self.ctx.extractor.extract_anchors(&page.body);
        let extracted = anchors.len();

        let in_scope: Vec<String> = anchors
            .iter()
            .map(|anchor| normalize_link(anchor))
            .filter(|anchor| domains_match(anchor, &self.ctx.domain))
            .collect();
        let out_of_scope = extracted - in_scope.len();

        let enqueued = self.ctx.frontier.push_all(&in_scope);
        self.ctx.stats.record_links(extracted, out_of_scope, enqueued);

        tracing::debug!(
            "Worker {}: {} -> {} link(s), {} in scope, {} enqueued, {} queued in total",
            self.id,
            link,
            extracted,
            in_scope.len(),
            enqueued,
            self.ctx.frontier.len()
        );

        State::SeekingWork
    }

    async fn idle_wait(&mut self) -> State {
        tokio::time::sleep(self.ctx.idle_tick).await;
        self.idle_ticks += 1;

        // Both conditions are checked on every tick
        if self.idle_ticks >= self.ctx.idle_threshold && self.ctx.frontier.is_empty() {
            State::Terminated
        } else {
            State::SeekingWork
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::testing::FakeSite;
    use crate::fetch::HtmlAnchorExtractor;
    use tokio::time::Instant;

    const TICK: Duration = Duration::from_secs(1);

    fn context(site: Arc<FakeSite>, domain: &str, idle_threshold: u32) -> Arc<CrawlContext> {
        Arc::new(CrawlContext {
            frontier: Arc::new(SharedFrontier::new()),
            domain: Domain::from_host(domain),
            fetcher: site,
            extractor: Arc::new(HtmlAnchorExtractor),
            stats: Arc::new(CrawlStats::default()),
            idle_threshold,
            idle_tick: TICK,
            announce: false,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_worker_stops_after_threshold() {
        let ctx = context(Arc::new(FakeSite::new()), "example.com", 5);

        let started = Instant::now();
        Worker::new(0, ctx.clone()).run().await;

        assert_eq!(started.elapsed(), 5 * TICK);
        assert_eq!(ctx.stats.snapshot(1, Duration::ZERO).worker_terminations, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_follows_in_domain_links() {
        let site = Arc::new(
            FakeSite::new()
                .page(
                    "http://example.com",
                    r#"<a href="http://example.com/a">A</a><a href="http://other.com/b">B</a>"#,
                )
                .page("http://example.com/a", "no links"),
        );
        let ctx = context(site.clone(), "example.com", 3);
        ctx.frontier.push("http://example.com");

        Worker::new(0, ctx.clone()).run().await;

        assert_eq!(
            site.requests(),
            vec!["http://example.com", "http://example.com/a"]
        );
        let summary = ctx.stats.snapshot(1, Duration::ZERO);
        assert_eq!(summary.committed, 2);
        assert_eq!(summary.links_extracted, 2);
        assert_eq!(summary.links_out_of_scope, 1);
        assert_eq!(summary.links_enqueued, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_off_domain_redirect_discards_page() {
        let site = Arc::new(
            FakeSite::new()
                .redirect(
                    "http://example.com/moved",
                    "http://elsewhere.org/landing",
                    r#"<a href="http://example.com/never">Never</a>"#,
                ),
        );
        let ctx = context(site.clone(), "example.com", 2);
        ctx.frontier.push("http://example.com/moved");

        Worker::new(0, ctx.clone()).run().await;

        assert_eq!(site.requests(), vec!["http://example.com/moved"]);
        let summary = ctx.stats.snapshot(1, Duration::ZERO);
        assert_eq!(summary.redirected_off_domain, 1);
        assert_eq!(summary.links_extracted, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_domain_redirect_keeps_page() {
        let site = Arc::new(
            FakeSite::new()
                .redirect(
                    "http://example.com/old",
                    "https://www.example.com/new",
                    r#"<a href="http://example.com/next">Next</a>"#,
                )
                .page("http://example.com/next", ""),
        );
        let ctx = context(site.clone(), "example.com", 2);
        ctx.frontier.push("http://example.com/old");

        Worker::new(0, ctx.clone()).run().await;

        assert_eq!(
            site.requests(),
            vec!["http://example.com/old", "http://example.com/next"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_is_not_retried() {
        let site = Arc::new(FakeSite::new().failing("http://example.com/broken"));
        let ctx = context(site.clone(), "example.com", 2);
        ctx.frontier.push("http://example.com/broken");

        Worker::new(0, ctx.clone()).run().await;

        // The link stays committed: pushing it again is a no-op
        assert!(!ctx.frontier.push("http://example.com/broken"));
        assert_eq!(site.requests(), vec!["http://example.com/broken"]);
        assert_eq!(ctx.stats.snapshot(1, Duration::ZERO).fetch_failed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_relative_links_are_dropped() {
        let site = Arc::new(FakeSite::new().page(
            "http://example.com",
            r##"<a href="/about">About</a><a href="../up">Up</a><a href="#top">Top</a>"##,
        ));
        let ctx = context(site.clone(), "example.com", 1);
        ctx.frontier.push("http://example.com");

        Worker::new(0, ctx.clone()).run().await;

        assert_eq!(site.requests(), vec!["http://example.com"]);
        assert_eq!(ctx.stats.snapshot(1, Duration::ZERO).links_out_of_scope, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_counter_resets_when_work_arrives() {
        let site = Arc::new(FakeSite::new().page("http://example.com/late", ""));
        let ctx = context(site.clone(), "example.com", 3);

        let late = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            late.frontier.push("http://example.com/late");
        });

        let started = Instant::now();
        Worker::new(0, ctx.clone()).run().await;

        // The third tick sees a non-empty frontier, claims the link at t=3s,
        // then needs 3 more idle ticks
        assert_eq!(site.requests(), vec!["http://example.com/late"]);
        assert_eq!(started.elapsed(), 6 * TICK);
    }
}
