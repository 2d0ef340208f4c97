//! Repl command - interactive prompt loop on stdin/stdout

use std::fmt::Write as _;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::warn;

use crate::domain::{QueryRequest, QueryResponse, QueryRouter, RouterConfig};

const RULE_WIDTH: usize = 60;

/// Run the interactive shell until `exit`, `quit` or end of input
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let router = crate::build_query_router(&config).await?;

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"Tiered prompt cache. Type 'exit' or 'quit' to stop.\n")
        .await?;

    run_loop(&router, BufReader::new(tokio::io::stdin()), &mut stdout).await
}

/// Read prompts line by line and write one report per answered prompt
///
/// Blank lines are skipped. A failed query is reported and the loop continues.
pub async fn run_loop<R, W>(router: &QueryRouter, input: R, output: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        output.write_all(b"\n> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let prompt = line.trim();

        if prompt.is_empty() {
            continue;
        }

        if is_exit_command(prompt) {
            output.write_all(b"Goodbye!\n").await?;
            break;
        }

        match router.query(&QueryRequest::new(prompt)).await {
            Ok(response) => {
                let report = format_response(prompt, &response, router.config());
                output.write_all(report.as_bytes()).await?;
            }
            Err(e) => {
                warn!(error = %e, "Query failed");
                output
                    .write_all(format!("Error during query: {}\n", e).as_bytes())
                    .await?;
            }
        }
    }

    output.flush().await?;
    Ok(())
}

fn is_exit_command(prompt: &str) -> bool {
    prompt.eq_ignore_ascii_case("exit") || prompt.eq_ignore_ascii_case("quit")
}

/// Render a query result for the terminal
pub fn format_response(prompt: &str, response: &QueryResponse, config: &RouterConfig) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "PROMPT: {}", prompt);
    let _ = writeln!(out, "SOURCE: {}", response.source());
    let _ = writeln!(out, "LATENCY: {:.2}ms", response.latency_ms());

    if let Some(similarity) = response.similarity() {
        let _ = write!(out, "SIMILARITY: {:.4}", similarity);
        if config.is_promotable(similarity) {
            let _ = write!(out, " (promoted to exact cache)");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{}", response.text());
    let _ = writeln!(out, "{}", rule);

    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::cache::MockExactCache;
    use crate::domain::embedding::MockEmbedder;
    use crate::domain::llm::MockGenerator;
    use crate::domain::semantic_cache::MockSemanticCache;
    use crate::infrastructure::cache::InMemoryExactCache;
    use crate::infrastructure::embedding::HashingEmbedder;
    use crate::infrastructure::llm::EchoGenerator;
    use crate::infrastructure::semantic_cache::InMemorySemanticCache;

    fn offline_router() -> QueryRouter {
        QueryRouter::builder()
            .exact_cache(Arc::new(InMemoryExactCache::new()))
            .semantic_cache(Arc::new(InMemorySemanticCache::default()))
            .embedder(Arc::new(HashingEmbedder::default()))
            .generator(Arc::new(EchoGenerator::new()))
            .build()
            .unwrap()
    }

    async fn run_with_input(router: &QueryRouter, input: &str) -> String {
        let mut output = Vec::new();
        run_loop(router, input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_format_generated() {
        let response = QueryResponse::generated("4", 12.5);

        let report = format_response("What is 2+2?", &response, &RouterConfig::default());

        assert!(report.contains("PROMPT: What is 2+2?"));
        assert!(report.contains("SOURCE: GENERATED"));
        assert!(report.contains("LATENCY: 12.50ms"));
        assert!(!report.contains("SIMILARITY"));
        assert!(report.contains("\n4\n"));
    }

    #[test]
    fn test_format_promoted_semantic_hit() {
        let response = QueryResponse::semantic_hit("4", 1.0, 0.97);

        let report = format_response("what's 2 plus 2", &response, &RouterConfig::default());

        assert!(report.contains("SOURCE: SEMANTIC_HIT"));
        assert!(report.contains("SIMILARITY: 0.9700 (promoted to exact cache)"));
    }

    #[test]
    fn test_format_unpromoted_semantic_hit() {
        let response = QueryResponse::semantic_hit("4", 1.0, 0.92);

        let report = format_response("2+2", &response, &RouterConfig::default());

        assert!(report.contains("SIMILARITY: 0.9200\n"));
        assert!(!report.contains("promoted"));
    }

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("QUIT"));
        assert!(!is_exit_command("exit now"));
    }

    #[tokio::test]
    async fn test_loop_generates_then_hits() {
        let router = offline_router();

        let output = run_with_input(&router, "What is 2+2?\n\n  what is 2+2?  \nquit\nignored\n").await;

        let generated = output.find("SOURCE: GENERATED").unwrap();
        let exact = output.find("SOURCE: EXACT_HIT").unwrap();
        assert!(generated < exact);
        assert!(output.contains("Goodbye!"));
        assert!(!output.contains("ignored"));
    }

    #[tokio::test]
    async fn test_loop_stops_at_end_of_input() {
        let router = offline_router();

        let output = run_with_input(&router, "hello").await;

        assert!(output.contains("Mock response for: hello"));
        assert!(!output.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_loop_continues_after_error() {
        let generator = Arc::new(MockGenerator::new("").with_error("ollama unreachable"));
        let router = QueryRouter::builder()
            .exact_cache(Arc::new(MockExactCache::new()))
            .semantic_cache(Arc::new(MockSemanticCache::new()))
            .embedder(Arc::new(MockEmbedder::default()))
            .generator(generator.clone())
            .build()
            .unwrap();

        let output = run_with_input(&router, "first\nsecond\nexit\n").await;

        assert_eq!(output.matches("Error during query").count(), 2);
        assert!(output.contains("ollama unreachable"));
        assert_eq!(generator.calls(), 2);
    }
}
