use crate::command::Reply;
use crate::config::Config;
use crate::emulator::Emulator;
use crate::error::MockResult;
use crate::value::{Options, Value};
use std::fmt::Write as _;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

const PROMPT: &[u8] = b"redmock> ";

/// Feed whitespace-separated command lines from `reader` into `emulator`
/// until EOF or `QUIT`, writing redis-cli style text to `writer`.
///
/// Tokens reach the engine as [`Value::Raw`], so member text such as `007`
/// is stored exactly as typed. Command errors are printed and the session
/// carries on.
pub async fn run_session<R, W>(
    reader: R,
    mut writer: W,
    emulator: &mut Emulator,
    config: &Config,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!(file = config.file.as_deref(), "session started");
    let mut lines = reader.lines();
    let mut handled = 0u64;

    loop {
        if config.show_prompt() {
            writer.write_all(PROMPT).await?;
        }
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((name, rest)) = tokens.split_first() else {
            continue;
        };
        handled += 1;
        match dispatch(emulator, name, rest) {
            Some(text) => writer.write_all(text.as_bytes()).await?,
            None => {
                writer.write_all(b"OK\n").await?;
                break;
            }
        }
    }

    writer.flush().await?;
    info!(requests = handled, "session ended");
    Ok(())
}

/// Run one line. `None` means the session should end.
fn dispatch(emulator: &mut Emulator, name: &str, args: &[&str]) -> Option<String> {
    let text = match name.to_ascii_uppercase().as_str() {
        "QUIT" => return None,
        "FLUSHALL" | "FLUSHDB" => {
            emulator.reset();
            "OK\n".to_string()
        }
        "INSPECT" => {
            let lines: Vec<String> = emulator.inspect().lines().map(str::to_string).collect();
            numbered(&lines)
        }
        _ => {
            let values: Vec<Value> = args.iter().map(|a| Value::raw(*a)).collect();
            render(emulator.execute_command(name, &values, &Options::new()))
        }
    };
    Some(text)
}

fn render(result: MockResult<Reply>) -> String {
    match result {
        Ok(Reply::Bool(b)) => format!("(integer) {}\n", i64::from(b)),
        Ok(Reply::Integer(n)) => format!("(integer) {n}\n"),
        Ok(Reply::Bools(flags)) => {
            let items: Vec<String> = flags.iter().map(|b| format!("(integer) {}", i64::from(*b))).collect();
            list(&items)
        }
        Ok(Reply::Members(members)) => numbered(&members),
        Ok(Reply::WithScores(items)) => {
            let flat: Vec<String> = items
                .into_iter()
                .flat_map(|(member, score)| [member, format!("{score}")])
                .collect();
            numbered(&flat)
        }
        Ok(Reply::Set(members)) => {
            let mut sorted: Vec<String> = members.into_iter().collect();
            sorted.sort();
            numbered(&sorted)
        }
        Err(e) => format!("(error) {e}\n"),
    }
}

/// Quoted, numbered items: `1) "a"`.
fn numbered(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("\"{s}\"")).collect();
    list(&quoted)
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        return "(empty array)\n".to_string();
    }
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{}) {item}", i + 1);
    }
    out
}
