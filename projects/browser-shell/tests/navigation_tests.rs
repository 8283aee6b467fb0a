#[cfg(test)]
mod navigation_tests {
    use async_trait::async_trait;
    use browser_db::Database;
    use browser_shell::{
        browse::browse, BrowserServices, FetchError, Fetcher, NavButtons, Page, Render, TabWindow,
    };
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Serves fixed pages; addresses listed in `broken` fail as unreachable
    #[derive(Default)]
    struct FixtureFetcher {
        pages: HashMap<String, String>,
        broken: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl FixtureFetcher {
        fn with_pages(addresses: &[&str]) -> Self {
            Self {
                pages: addresses
                    .iter()
                    .map(|a| (a.to_string(), format!("<html><title>{}</title></html>", a)))
                    .collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl Fetcher for FixtureFetcher {
        async fn fetch(&self, address: &str) -> Result<Page, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.broken.lock().unwrap().iter().any(|b| b == address) {
                return Err(FetchError::UnreachableHost(address.to_string()));
            }
            match self.pages.get(address) {
                Some(body) => Ok(Page {
                    address: address.to_string(),
                    status: 200,
                    body: body.clone(),
                }),
                None => Err(FetchError::HttpStatus {
                    status: 404,
                    body: "not found".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingScreen {
        titles: Vec<String>,
        buttons: NavButtons,
    }

    impl Render for RecordingScreen {
        fn set_address(&mut self, _address: &str) {}

        fn render_page(&mut self, _body: &str, title: &str) {
            self.titles.push(title.to_string());
        }

        fn set_nav_buttons(&mut self, buttons: NavButtons) {
            self.buttons = buttons;
        }
    }

    async fn services() -> Arc<BrowserServices> {
        let _ = env_logger::try_init();
        let db = Arc::new(Database::new_in_memory().await.expect("Failed to create in-memory database"));
        Arc::new(BrowserServices::bootstrap(db).await.expect("Failed to bootstrap"))
    }

    fn current_address<F: Fetcher, R: Render>(window: &TabWindow<F, R>) -> Option<String> {
        window.stack().current().map(|e| e.visit.address().to_string())
    }

    #[tokio::test]
    async fn test_back_twice_after_three_visits() {
        let services = services().await;
        let fetcher = Arc::new(FixtureFetcher::with_pages(&["A", "B", "C"]));
        let mut window = TabWindow::new(services.clone(), fetcher.clone(), RecordingScreen::default());

        for address in ["A", "B", "C"] {
            window.load_url_with_history(address).await.expect("visit failed");
        }
        assert_eq!(window.stack().index(), 0);
        assert!(window.nav_buttons().back);
        assert!(!window.nav_buttons().forward);

        assert!(window.back());
        assert!(window.back());
        assert_eq!(window.stack().index(), -2);
        assert_eq!(current_address(&window).as_deref(), Some("A"));
        assert_eq!(window.renderer().buttons, NavButtons { back: false, forward: true, refresh: true });
        assert_eq!(window.renderer().titles.last().map(String::as_str), Some("200 A"));

        // Back/forward replay from the stack without fetching
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
        assert!(!window.back());
    }

    #[tokio::test]
    async fn test_new_visit_truncates_forward_entries() {
        let services = services().await;
        let fetcher = Arc::new(FixtureFetcher::with_pages(&["A", "B", "C", "D"]));
        let mut window = TabWindow::new(services.clone(), fetcher, RecordingScreen::default());

        for address in ["A", "B", "C"] {
            window.load_url_with_history(address).await.unwrap();
        }
        window.back();
        assert_eq!(current_address(&window).as_deref(), Some("B"));

        window.load_url_with_history("D").await.unwrap();
        let stacked: Vec<&str> = window.stack().entries().iter().map(|e| e.visit.address()).collect();
        assert_eq!(stacked, vec!["A", "B", "D"]);
        assert_eq!(window.stack().index(), 0);

        // History keeps every successful visit, in visit order
        let history: Vec<String> = services.history.list().into_iter().map(|v| v.value).collect();
        assert_eq!(history, vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stack() {
        let services = services().await;
        let fetcher = Arc::new(FixtureFetcher::with_pages(&["A", "B"]));
        let mut window = TabWindow::new(services.clone(), fetcher.clone(), RecordingScreen::default());

        window.load_url_with_history("A").await.unwrap();
        window.load_url_with_history("B").await.unwrap();
        window.back();

        fetcher.broken.lock().unwrap().push("A".to_string());
        let err = window.refresh().await.unwrap_err();
        assert!(matches!(err, browser_shell::ShellError::Fetch(FetchError::UnreachableHost(_))));
        assert_eq!(window.stack().index(), -1);
        assert_eq!(window.stack().len(), 2);
        assert_eq!(window.renderer().titles.last().map(String::as_str), Some("Unreachable Host"));

        fetcher.broken.lock().unwrap().clear();
        let page = window.refresh().await.unwrap();
        assert_eq!(page.address, "A");
        assert_eq!(window.stack().index(), -1);
        assert_eq!(services.history.count(), 2);
    }

    #[tokio::test]
    async fn test_browse_loop_drives_window() {
        let services = services().await;
        let fetcher = Arc::new(FixtureFetcher::with_pages(&[
            browser_db::options::DEFAULT_HOME_PAGE,
            "https://a.test",
            "https://b.test",
        ]));
        let mut window = TabWindow::new(services.clone(), fetcher, RecordingScreen::default());
        let handle = window.handle();

        let script: &[u8] = b"go https://a.test\nhttps://b.test\nback\nbookmark A site\nhistory\nquit\ngo https://never.test\n";
        browse(&mut window, &services, script, None).await.unwrap();

        assert!(handle.is_closed());
        let stacked: Vec<&str> = window.stack().entries().iter().map(|e| e.visit.address()).collect();
        assert_eq!(stacked, vec![browser_db::options::DEFAULT_HOME_PAGE, "https://a.test", "https://b.test"]);
        assert_eq!(window.stack().index(), -1);
        assert_eq!(services.favorites.get(&"https://a.test".to_string()).unwrap(), "A site");
        assert_eq!(services.history.count(), 2);
        assert!(window.renderer().titles.contains(&"History".to_string()));
    }

    #[tokio::test]
    async fn test_browse_opens_history_and_bookmark_entries() {
        let services = services().await;
        let fetcher = Arc::new(FixtureFetcher::with_pages(&[
            browser_db::options::DEFAULT_HOME_PAGE,
            "https://a.test",
            "https://b.test",
        ]));
        let mut window = TabWindow::new(services.clone(), fetcher, RecordingScreen::default());

        let script: &[u8] = b"go https://a.test\n\
            go https://b.test\n\
            history open 2\n\
            bookmark Ay\n\
            go https://b.test\n\
            bookmarks\n\
            bookmarks open Ay\n\
            bookmarks open 9\n\
            history open 40\n";
        browse(&mut window, &services, script, None).await.unwrap();

        let stacked: Vec<&str> = window.stack().entries().iter().map(|e| e.visit.address()).collect();
        assert_eq!(
            stacked,
            vec![
                browser_db::options::DEFAULT_HOME_PAGE,
                "https://a.test",
                "https://b.test",
                "https://a.test",
                "https://b.test",
                "https://a.test",
            ]
        );
        assert_eq!(window.stack().index(), 0);

        // Opening an entry is a new navigation, so it is recorded again
        let history: Vec<String> = services.history.list().into_iter().map(|v| v.value).collect();
        assert_eq!(
            history,
            vec!["https://a.test", "https://b.test", "https://a.test", "https://b.test", "https://a.test"]
        );

        let titles = &window.renderer().titles;
        assert!(titles.contains(&"Bookmarks".to_string()));
        assert_eq!(titles.last().map(String::as_str), Some("History"));
    }
}
