//! Interactive check loop
//!
//! One line per turn. `exit` (any case) or end of input ends the session
//! without touching the model. A failed turn, including a line that is not
//! valid UTF-8, is reported and the loop keeps reading.

use super::render::Renderer;
use crate::core::PiiGuard;
use crate::domain::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::Instrument;
use uuid::Uuid;

pub const PROMPT: &str = "Please enter a sentence to check for PII (type 'exit' to quit):";

/// Counters reported when the session ends
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub turns: usize,
    pub failed_turns: usize,
}

pub struct InteractiveSession<'a, W: Write> {
    guard: &'a PiiGuard,
    renderer: Renderer,
    output: W,
}

impl<'a, W: Write> InteractiveSession<'a, W> {
    pub fn new(guard: &'a PiiGuard, renderer: Renderer, output: W) -> Self {
        Self {
            guard,
            renderer,
            output,
        }
    }

    /// Read sentences from `input` until `exit` or end of input
    ///
    /// # Errors
    ///
    /// Only I/O failures on `input` or the output writer end the session
    /// with an error.
    pub async fn run<R>(&mut self, mut input: R) -> Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut summary = SessionSummary::default();
        let mut bytes = Vec::new();

        loop {
            writeln!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            bytes.clear();
            if input.read_until(b'\n', &mut bytes).await? == 0 {
                tracing::debug!("End of input");
                break;
            }

            let line = match std::str::from_utf8(&bytes) {
                Ok(line) => line,
                Err(e) => {
                    summary.turns += 1;
                    summary.failed_turns += 1;
                    tracing::warn!(error = %e, "Input line is not valid UTF-8");
                    let rendered = self
                        .renderer
                        .turn_error(&format!("input is not valid UTF-8: {e}"));
                    self.output.write_all(rendered.as_bytes())?;
                    continue;
                }
            };

            let sentence = line.trim_end_matches(['\r', '\n']);
            if sentence.trim().eq_ignore_ascii_case("exit") {
                break;
            }
            if sentence.trim().is_empty() {
                continue;
            }

            summary.turns += 1;
            if !self.turn(sentence).await? {
                summary.failed_turns += 1;
            }
        }

        tracing::info!(
            turns = summary.turns,
            failed_turns = summary.failed_turns,
            "Session ended"
        );
        Ok(summary)
    }

    /// Inspect one sentence and print the result; `false` when the turn failed
    async fn turn(&mut self, sentence: &str) -> Result<bool> {
        let span = tracing::info_span!("turn", turn_id = %Uuid::new_v4());
        let outcome = self.guard.inspect(sentence).instrument(span.clone()).await;

        let _entered = span.enter();
        match outcome {
            Ok(inspection) => {
                let rendered = self.renderer.inspection(sentence, &inspection);
                self.output.write_all(rendered.as_bytes())?;
                Ok(true)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Inspection failed");
                let rendered = self.renderer.turn_error(&e.to_string());
                self.output.write_all(rendered.as_bytes())?;
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ScriptedTransport;
    use crate::config::GuardConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct ErrorEvents(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for ErrorEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn guard(transport: Arc<ScriptedTransport>) -> PiiGuard {
        PiiGuard::from_config(&GuardConfig::default(), transport)
    }

    async fn run(guard: &PiiGuard, input: impl AsRef<[u8]>) -> (SessionSummary, String) {
        let mut output = Vec::new();
        let summary = InteractiveSession::new(guard, Renderer::new(false), &mut output)
            .run(input.as_ref())
            .await
            .unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_exit_makes_no_model_calls() {
        let transport = Arc::new(ScriptedTransport::new(["True"]));
        let guard = guard(transport.clone());

        let (summary, output) = run(&guard, "EXIT\nMy name is Ada\n").await;

        assert_eq!(summary.turns, 0);
        assert_eq!(transport.call_count(), 0);
        assert_eq!(output, format!("{PROMPT}\n"));
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() {
        let transport = Arc::new(ScriptedTransport::default());
        let guard = guard(transport.clone());

        let (summary, _) = run(&guard, "").await;

        assert_eq!(summary, SessionSummary::default());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_lines_are_skipped() {
        let transport = Arc::new(ScriptedTransport::default());
        let guard = guard(transport.clone());

        let (summary, output) = run(&guard, "\n   \nexit\n").await;

        assert_eq!(summary.turns, 0);
        assert_eq!(transport.call_count(), 0);
        assert_eq!(output.matches(PROMPT).count(), 3);
    }

    #[tokio::test]
    async fn test_transport_error_does_not_end_session() {
        let transport = Arc::new(ScriptedTransport::new(Vec::<String>::new()));
        transport.push_error(crate::domain::TransportError::AuthenticationFailed(
            "missing credentials".to_string(),
        ));
        transport.push_completion("False");
        let guard = guard(transport.clone());

        let (summary, output) = run(&guard, "first\nsecond\nexit\n").await;

        assert_eq!(summary.turns, 2);
        assert_eq!(summary.failed_turns, 1);
        assert!(output.contains("Error:"));
        assert!(output.contains("SENTENCE: 'second'\nContains PII: False"));
    }

    #[tokio::test]
    async fn test_failed_turn_logs_one_error_event() {
        let errors = Arc::new(AtomicUsize::new(0));
        let _default = tracing::subscriber::set_default(
            tracing_subscriber::registry().with(ErrorEvents(errors.clone())),
        );
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_error(crate::domain::TransportError::ServiceError {
            status: 500,
            message: "internal".to_string(),
        });
        let guard = guard(transport.clone());

        let (summary, _) = run(&guard, "first\nexit\n").await;

        assert_eq!(summary.failed_turns, 1);
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_windows_line_endings_are_stripped() {
        let transport = Arc::new(ScriptedTransport::new(["False"]));
        let guard = guard(transport.clone());

        let (_, output) = run(&guard, "hello\r\nexit\r\n").await;

        assert!(output.contains("SENTENCE: 'hello'\n"));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_reported_and_skipped() {
        let transport = Arc::new(ScriptedTransport::new(["False"]));
        let guard = guard(transport.clone());

        let (summary, output) = run(&guard, b"caf\xe9 au lait\nhello\nexit\n").await;

        assert_eq!(summary.turns, 2);
        assert_eq!(summary.failed_turns, 1);
        assert!(output.contains("Error: input is not valid UTF-8"));
        assert!(output.contains("SENTENCE: 'hello'\nContains PII: False"));
        assert_eq!(output.matches(PROMPT).count(), 3);
        assert_eq!(transport.call_count(), 1);
    }
}
