//! Line-oriented console around an [`Editor`].

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::editor::command::{Command, HELP};
use crate::editor::session::Editor;
use crate::endpoints::Endpoint;

const PROMPT: &str = "mocksmith> ";

/// Read commands until `quit` or end of input.
///
/// Returns the editor so the caller decides when its reload handle is dropped.
pub async fn run<R, W>(mut editor: Editor, input: R, mut output: W) -> std::io::Result<Editor>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    output.write_all(b"Type 'help' for commands, 'add' to create an endpoint.\n").await?;
    write_list(&mut output, editor.endpoints()).await?;

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                write_line(&mut output, &format!("error: {}", e)).await?;
                continue;
            }
        };

        match command {
            Command::Empty => {}
            Command::List => write_list(&mut output, editor.endpoints()).await?,
            Command::Help => write_line(&mut output, HELP).await?,
            Command::Quit => break,
            Command::Add(draft) => match editor.add(draft).await {
                Ok(e) => write_line(&mut output, &format!("added {}", describe(&e))).await?,
                Err(e) => write_line(&mut output, &format!("error: {}", e)).await?,
            },
            Command::Remove(selector) => match editor.remove(&selector).await {
                Ok(e) => write_line(&mut output, &format!("removed {}", describe(&e))).await?,
                Err(e) => write_line(&mut output, &format!("error: {}", e)).await?,
            },
        }
    }

    output.flush().await?;
    Ok(editor)
}

fn describe(endpoint: &Endpoint) -> String {
    let mut line = format!(
        "[{}] {} -> {}",
        endpoint.method, endpoint.path, endpoint.status_code
    );
    if endpoint.delay_ms > 0 {
        line.push_str(&format!(" after {}ms", endpoint.delay_ms));
    }
    line
}

async fn write_list<W: AsyncWrite + Unpin>(output: &mut W, endpoints: &[Endpoint]) -> std::io::Result<()> {
    if endpoints.is_empty() {
        return write_line(output, "No endpoints yet. Use 'add' to create one!").await;
    }

    let mut text = String::from("Endpoints:\n");
    for (i, endpoint) in endpoints.iter().enumerate() {
        text.push_str(&format!("{:>3}. {}  ({})\n", i + 1, describe(endpoint), endpoint.id));
    }
    output.write_all(text.as_bytes()).await
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::{Configuration, EndpointStore};
    use crate::reload::{reload_channel, DEFAULT_CHANNEL_CAPACITY};

    async fn session(script: &str) -> (Editor, String) {
        let dir = tempfile::tempdir().unwrap();
        let store = EndpointStore::new(dir.path().join("endpoints.json"));
        let (handle, coordinator) = reload_channel(&Configuration::new(), DEFAULT_CHANNEL_CAPACITY);
        tokio::spawn(coordinator.run());

        let editor = Editor::new(Configuration::new(), store, handle);
        let mut output = Vec::new();
        let editor = run(editor, script.as_bytes(), &mut output).await.unwrap();
        (editor, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_add_list_remove() {
        let (editor, output) = session(
            "add GET /ping {\"ok\":true}\nadd POST /users 201\nls\nrm 1\nquit\nadd GET /never\n",
        )
        .await;

        assert!(output.contains("added [GET] /ping -> 200"));
        assert!(output.contains("added [POST] /users -> 201"));
        assert!(output.contains("  2. [POST] /users -> 201"));
        assert!(output.contains("removed [GET] /ping -> 200"));
        assert_eq!(editor.endpoints().len(), 1);
        assert_eq!(editor.endpoints()[0].path, "/users");
    }

    #[tokio::test]
    async fn test_errors_reported_and_session_continues() {
        let (editor, output) = session("bogus\nadd GET /x {oops\nrm 9\nadd GET /y\n").await;

        assert!(output.contains("error: unknown command: bogus"));
        assert!(output.contains("error: invalid JSON"));
        assert!(output.contains("error: no endpoint matches 9"));
        assert_eq!(editor.endpoints().len(), 1);
    }
}
