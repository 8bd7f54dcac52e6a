//! The three ways a save is started: automatically once a page has loaded, on
//! demand through a `getText` request, and manually through "save now".

use crate::browser::PageSource;
use crate::dom::ComputedLayout;
use crate::error::Result;
use crate::extract::Extractor;
use crate::messages::{Request, SaveHandler, SaveResponse, TextResponse};
use crate::save::TextWriter;

/// Capture the page and extract a record, answering a `getText` request
pub async fn answer_get_text<S: PageSource>(source: &S) -> Result<TextResponse> {
    let page = source.capture().await?;
    let text = Extractor::new(&page, ComputedLayout).extract();
    Ok(TextResponse { text })
}

/// Auto-save after page load: extract, then send a `saveText` request built
/// from the page's own title and URL
pub async fn auto_save<S, W>(source: &S, handler: &SaveHandler<W>) -> Result<SaveResponse>
where
    S: PageSource,
    W: TextWriter,
{
    let TextResponse { text } = answer_get_text(source).await?;
    let request = Request::SaveText {
        url: text.url.clone(),
        title: text.title.clone(),
        text,
    };
    let response = handler.handle(request).await;

    match &response.filename {
        Some(filename) if response.success => {
            ::log::info!("Text content successfully saved to file: {}", filename);
        }
        _ => ::log::error!(
            "Failed to save text content: {}",
            response.error.as_deref().unwrap_or("unknown error")
        ),
    }
    Ok(response)
}

/// Manual "save now": `getText` followed by `saveText`, reported as a status line
pub async fn save_now<S, W>(source: &S, handler: &SaveHandler<W>) -> String
where
    S: PageSource,
    W: TextWriter,
{
    let text = match answer_get_text(source).await {
        Ok(TextResponse { text }) => text,
        Err(e) => return format!("Error: {}", e),
    };

    let request = Request::SaveText {
        url: text.url.clone(),
        title: text.title.clone(),
        text,
    };
    save_status(&handler.handle(request).await)
}

/// Status line for a save response
pub fn save_status(response: &SaveResponse) -> String {
    match (&response.filename, &response.error) {
        (Some(filename), _) if response.success => {
            format!("Text content saved successfully as: {}", filename)
        }
        (_, Some(error)) => format!("Error saving text: {}", error),
        _ => "Error saving text: Unknown error".to_string(),
    }
}
