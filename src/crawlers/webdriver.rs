use crate::config::RendererConfig;
use crate::crawlers::Renderer;
use crate::error::{CrawlError, Result};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Map, Value, json};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio::time::{Duration, sleep, timeout};
use url::Url;

/// Command-line switches passed to Chrome
pub const CHROME_ARGS: &[&str] = &[
    "--headless",
    "--disable-gpu",
    "--no-sandbox",
    "--disable-dev-shm-usage",
];

/// Connection attempts made while a freshly spawned chromedriver starts up
const CONNECT_ATTEMPTS: u32 = 20;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(250);

/// Renders pages in headless Chrome over WebDriver
///
/// Owns the chromedriver process when it spawned one. Call
/// [`Renderer::close`] to end the session and stop the driver.
pub struct WebDriverRenderer {
    client: Client,
    driver: Option<Child>,
    config: RendererConfig,
}

impl WebDriverRenderer {
    /// Start (or attach to) a WebDriver server and open a browser session
    pub async fn launch(config: RendererConfig) -> Result<Self> {
        let (webdriver_url, driver) = match &config.webdriver_url {
            Some(url) => {
                ::log::info!("Using WebDriver server at {}", url);
                (url.clone(), None)
            }
            None => {
                let child = spawn_chromedriver(&config)?;
                let url = format!("http://localhost:{}", config.webdriver_port);
                ::log::info!(
                    "Started {} on {}",
                    config.chromedriver_path.display(),
                    url
                );
                (url, Some(child))
            }
        };

        let client = match connect_to_webdriver(&webdriver_url, &config).await {
            Ok(client) => client,
            Err(e) => {
                if let Some(mut child) = driver {
                    if let Err(kill_err) = child.kill().await {
                        ::log::warn!("Failed to stop chromedriver: {}", kill_err);
                    }
                }
                return Err(e);
            }
        };

        Ok(Self {
            client,
            driver,
            config,
        })
    }

    /// Navigate, wait for readiness, let dynamic content settle, read the source
    async fn load(&self, url: &Url) -> Result<String> {
        self.client
            .goto(url.as_str())
            .await
            .map_err(|e| navigation_error(e, "access", url))?;

        self.client
            .wait()
            .at_most(self.config.ready_timeout)
            .for_element(Locator::Css("body"))
            .await
            .map_err(|e| navigation_error(e, "wait for body of", url))?;

        sleep(self.config.settle_delay).await;

        self.client
            .source()
            .await
            .map_err(|e| navigation_error(e, "get source for", url))
    }
}

impl Renderer for WebDriverRenderer {
    async fn render(&mut self, url: &Url) -> Result<String> {
        let started = std::time::Instant::now();

        let result = match timeout(self.config.page_timeout, self.load(url)).await {
            Ok(result) => result,
            Err(_) => Err(CrawlError::RenderTimeout {
                url: url.to_string(),
                seconds: self.config.page_timeout.as_secs(),
            }),
        };

        ::log::debug!(
            "Rendered {} in {:.2} seconds",
            url,
            started.elapsed().as_secs_f64()
        );
        result
    }

    async fn close(self) -> Result<()> {
        let Self { client, driver, .. } = self;

        let closed = client
            .close()
            .await
            .map_err(|e| CrawlError::WebDriver(format!("failed to close session: {}", e)));

        if let Some(mut child) = driver {
            if let Err(e) = child.kill().await {
                ::log::warn!("Failed to stop chromedriver: {}", e);
            }
        }

        closed
    }
}

/// Capabilities selecting the configured Chrome binary in headless mode
pub fn chrome_capabilities(config: &RendererConfig) -> Map<String, Value> {
    let mut caps = Map::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({
            "binary": config.chrome_binary_path.to_string_lossy(),
            "args": CHROME_ARGS,
        }),
    );
    caps
}

fn spawn_chromedriver(config: &RendererConfig) -> Result<Child> {
    Command::new(&config.chromedriver_path)
        .arg(format!("--port={}", config.webdriver_port))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            CrawlError::WebDriver(format!(
                "failed to start {}: {}",
                config.chromedriver_path.display(),
                e
            ))
        })
}

/// Connects to the WebDriver server, retrying while it starts up
async fn connect_to_webdriver(webdriver_url: &str, config: &RendererConfig) -> Result<Client> {
    let mut last_error = String::new();

    for attempt in 1..=CONNECT_ATTEMPTS {
        let mut builder = ClientBuilder::native();
        builder.capabilities(chrome_capabilities(config));

        match builder.connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!(
                    "Connected to WebDriver at {} (attempt {})",
                    webdriver_url,
                    attempt
                );
                return Ok(client);
            }
            Err(e) => {
                // Don't log every attempt to avoid log spam
                last_error = e.to_string();
                sleep(CONNECT_RETRY_DELAY).await;
            }
        }
    }

    ::log::error!(
        "Make sure chromedriver is runnable or set the WEBDRIVER_URL environment variable"
    );
    Err(CrawlError::WebDriver(format!(
        "could not connect to {}: {}",
        webdriver_url, last_error
    )))
}

/// Converts a WebDriver command error into a render failure
fn navigation_error(error: fantoccini::error::CmdError, context: &str, url: &Url) -> CrawlError {
    let reason = error.to_string();
    if reason.contains("Unable to find session") {
        ::log::warn!("Lost WebDriver session while trying to {} {}", context, url);
    }
    CrawlError::Render {
        url: url.to_string(),
        reason: format!("failed to {}: {}", context, reason),
    }
}
