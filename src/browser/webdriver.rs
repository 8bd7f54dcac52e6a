use super::PageSource;
use crate::config::BrowserConfig;
use crate::dom::{PageCapture, PageSnapshot};
use crate::error::{Result, ScrapeError};
use fantoccini::{Client, ClientBuilder};
use tokio::time::{Duration, timeout};

/// Serializes the live document in document order: every element with its
/// computed display/visibility and offset size, and every text node, each
/// pointing at its parent's index.
const CAPTURE_SCRIPT: &str = r#"
const nodes = [];
const stack = [[document.documentElement, null]];
while (stack.length > 0) {
  const [node, parent] = stack.pop();
  const index = nodes.length;
  if (node.nodeType === Node.ELEMENT_NODE) {
    const style = window.getComputedStyle(node);
    nodes.push({
      type: 'element',
      parent: parent,
      tag: node.tagName.toLowerCase(),
      classes: Array.from(node.classList || []),
      role: node.getAttribute('role'),
      display: style.display,
      visibility: style.visibility,
      width: node.offsetWidth || 0,
      height: node.offsetHeight || 0
    });
    const children = Array.from(node.childNodes).filter(
      (child) => child.nodeType === Node.ELEMENT_NODE || child.nodeType === Node.TEXT_NODE
    );
    for (let i = children.length - 1; i >= 0; i--) {
      stack.push([children[i], index]);
    }
  } else {
    nodes.push({ type: 'text', parent: parent, text: node.nodeValue || '' });
  }
}
return { title: document.title, url: location.href, nodes: nodes };
"#;

/// WebDriver servers tried when the configured one does not answer
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444",
];

/// A URL rendered by a WebDriver-controlled browser
#[derive(Debug, Clone)]
pub struct WebDriverPage {
    url: String,
    config: BrowserConfig,
}

impl WebDriverPage {
    pub fn new(url: &str, config: BrowserConfig) -> Self {
        Self {
            url: url.to_string(),
            config,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Navigate to the page and return its raw capture
    ///
    /// The whole round-trip, connection included, is bounded by the capture
    /// timeout.
    pub async fn capture_raw(&self) -> Result<PageCapture> {
        let limit = Duration::from_secs(self.config.capture_timeout_secs);
        match timeout(limit, self.open_and_capture()).await {
            Ok(result) => result,
            Err(_) => {
                ::log::error!("Timeout capturing: {}", self.url);
                Err(ScrapeError::MessagingUnavailable(format!(
                    "timed out after {}s capturing {}",
                    self.config.capture_timeout_secs, self.url
                )))
            }
        }
    }

    async fn open_and_capture(&self) -> Result<PageCapture> {
        let client = connect_to_webdriver(&self.config.webdriver_url).await?;
        let result = self.navigate_and_capture(&client).await;

        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }
        result
    }

    async fn navigate_and_capture(&self, client: &Client) -> Result<PageCapture> {
        let started = std::time::Instant::now();
        ::log::debug!("CAPTURE: {}", self.url);

        client
            .goto(&self.url)
            .await
            .map_err(|e| unreachable_page("navigate to", &self.url, e))?;

        tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;

        let value = client
            .execute(CAPTURE_SCRIPT, Vec::new())
            .await
            .map_err(|e| unreachable_page("run the capture script on", &self.url, e))?;

        let capture: PageCapture = serde_json::from_value(value)
            .map_err(|e| ScrapeError::InvalidSnapshot(format!("{}: {}", self.url, e)))?;

        ::log::debug!(
            "Captured {} nodes from {} in {:.2} seconds",
            capture.nodes.len(),
            self.url,
            started.elapsed().as_secs_f64()
        );
        Ok(capture)
    }
}

impl PageSource for WebDriverPage {
    async fn capture(&self) -> Result<PageSnapshot> {
        let capture = self.capture_raw().await?;
        PageSnapshot::from_capture(capture)
    }
}

/// Connects to the WebDriver instance, trying common local ports when the
/// configured URL does not answer
async fn connect_to_webdriver(webdriver_url: &str) -> Result<Client> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    for url in fallback_urls(webdriver_url) {
        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(ScrapeError::MessagingUnavailable(format!(
        "no WebDriver server answered at {} or the usual local ports",
        webdriver_url
    )))
}

/// Fallback URLs, skipping the one already tried
fn fallback_urls(webdriver_url: &str) -> impl Iterator<Item = &'static str> + '_ {
    FALLBACK_WEBDRIVER_URLS
        .into_iter()
        .filter(move |url| *url != webdriver_url)
}

fn unreachable_page(context: &str, url: &str, error: fantoccini::error::CmdError) -> ScrapeError {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost session while trying to {} {}", context, url);
    } else {
        ::log::error!("Failed to {} {}: {}", context, url, error);
    }
    ScrapeError::MessagingUnavailable(format!("failed to {} {}: {}", context, url, error))
}
