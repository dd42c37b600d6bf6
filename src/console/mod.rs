//! Interactive console loop
//!
//! Reads one line at a time, splits it into a verb and a free-text
//! argument, and runs the matching transform. Every per-command failure is
//! recoverable: the error is printed and the loop keeps going, so a single
//! bad input never ends the session. The only exits are the `exit` token
//! and a closed input source.

mod completer;

pub use completer::ConsoleHelper;

use anyhow::{Context as _, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use crate::codec;
use crate::opener::{Opener, SystemOpener};
use crate::search::{default_registry, EngineRegistry, DEFAULT_ENGINE};

/// Token that terminates the loop
pub const EXIT_TOKEN: &str = "exit";

/// Prompt shown before each line
pub const PROMPT: &str = "> ";

/// Recognized verbs with their descriptions, in completion order
pub const VERBS: &[(&str, &str)] = &[
    ("hash-md5", "md5加密"),
    ("hash-sha1", "sha1加密"),
    ("base64-encode", "base64加密"),
    ("base64-decode", "base64解密"),
    ("url-encode", "url加密"),
    ("url-decode", "url解密"),
    ("unicode-encode", "unicode加密"),
    ("unicode-decode", "unicode解密"),
    ("open", "使用默认程序打开文件"),
    ("//", "使用默认浏览器打开网址"),
    ("??", "使用搜索引擎搜索关键字"),
];

/// What the loop should do after a line has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit,
}

/// Command kinds, one per recognized verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Md5,
    Sha1,
    Base64Encode,
    Base64Decode,
    UrlEncode,
    UrlDecode,
    UnicodeEncode,
    UnicodeDecode,
    Open,
    OpenUrl,
    WebSearch,
}

impl CommandKind {
    /// Exact, case-sensitive verb match
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "hash-md5" => Some(Self::Md5),
            "hash-sha1" => Some(Self::Sha1),
            "base64-encode" => Some(Self::Base64Encode),
            "base64-decode" => Some(Self::Base64Decode),
            "url-encode" => Some(Self::UrlEncode),
            "url-decode" => Some(Self::UrlDecode),
            "unicode-encode" => Some(Self::UnicodeEncode),
            "unicode-decode" => Some(Self::UnicodeDecode),
            "open" => Some(Self::Open),
            "//" => Some(Self::OpenUrl),
            "??" => Some(Self::WebSearch),
            _ => None,
        }
    }
}

/// One parsed command, consumed within a single loop iteration
#[derive(Debug, Clone)]
pub struct Command {
    pub kind: CommandKind,
    /// Everything after the verb, whitespace runs collapsed to single
    /// spaces by the split/rejoin
    pub argument: String,
}

/// Parse result of one input line
#[derive(Debug, Clone)]
pub enum Directive {
    /// The exit token: terminate normally
    Exit,
    /// Fewer than two tokens: report, no dispatch
    Insufficient,
    /// Unrecognized verb: report, no dispatch
    Unsupported,
    /// A recognized command ready to run
    Run(Command),
}

impl Directive {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed == EXIT_TOKEN {
            return Self::Exit;
        }
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() < 2 {
            return Self::Insufficient;
        }
        match CommandKind::from_verb(tokens[0]) {
            Some(kind) => Self::Run(Command {
                kind,
                argument: tokens[1..].join(" "),
            }),
            None => Self::Unsupported,
        }
    }
}

/// The read-eval-print loop
///
/// Generic over the opener so tests can record open calls instead of
/// spawning system processes.
pub struct Console<'r, O: Opener> {
    registry: &'r EngineRegistry,
    opener: O,
}

impl Console<'static, SystemOpener> {
    /// Console over the shared built-in engine table and the system opener
    pub fn with_system_opener() -> Self {
        Self::new(default_registry(), SystemOpener)
    }
}

impl<'r, O: Opener> Console<'r, O> {
    pub fn new(registry: &'r EngineRegistry, opener: O) -> Self {
        Self { registry, opener }
    }

    pub fn registry(&self) -> &EngineRegistry {
        self.registry
    }

    /// Run the interactive loop until `exit`, Ctrl-C or end of input
    pub fn run(&self) -> Result<()> {
        let mut rl: Editor<ConsoleHelper, DefaultHistory> =
            Editor::new().context("failed to initialize line editor")?;
        rl.set_helper(Some(ConsoleHelper));

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = rl.add_history_entry(line.as_str());
                    }
                    if self.handle_line(&line) == Step::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err).context("failed to read input"),
            }
        }
        Ok(())
    }

    /// Handle one line: print the reply, if any, and report the next step
    pub fn handle_line(&self, line: &str) -> Step {
        let (step, reply) = self.respond(line);
        if let Some(reply) = reply {
            println!("{reply}");
        }
        step
    }

    /// Pure part of line handling: parse, dispatch, build the reply line
    pub fn respond(&self, line: &str) -> (Step, Option<String>) {
        match Directive::parse(line) {
            Directive::Exit => (Step::Exit, None),
            Directive::Insufficient => (Step::Continue, Some("参数不足".to_string())),
            Directive::Unsupported => (Step::Continue, Some("暂不支持该命令".to_string())),
            Directive::Run(command) => (Step::Continue, self.execute(&command)),
        }
    }

    fn execute(&self, command: &Command) -> Option<String> {
        let arg = command.argument.as_str();
        match command.kind {
            CommandKind::Md5 => Some(format!("md5加密结果: {}", codec::md5_hex(arg))),
            CommandKind::Sha1 => Some(format!("sha1加密结果: {}", codec::sha1_hex(arg))),
            CommandKind::Base64Encode => {
                Some(format!("base64加密结果: {}", codec::base64_encode(arg)))
            }
            CommandKind::Base64Decode => Some(match codec::base64_decode(arg) {
                Ok(bytes) => format!("base64解密结果: {}", String::from_utf8_lossy(&bytes)),
                Err(err) => format!("base64解密失败: {err}"),
            }),
            CommandKind::UrlEncode => Some(format!("url加密结果: {}", codec::url_encode(arg))),
            CommandKind::UrlDecode => Some(match codec::url_decode(arg) {
                Ok(text) => format!("url解密结果: {text}"),
                Err(err) => format!("url解密失败: {err}"),
            }),
            CommandKind::UnicodeEncode => {
                Some(format!("unicode加密结果: {}", codec::unicode_encode(arg)))
            }
            CommandKind::UnicodeDecode => Some(match codec::unicode_decode(arg) {
                Ok(text) => format!("unicode解密结果: {text}"),
                Err(err) => format!("unicode解密失败: {err}"),
            }),
            CommandKind::Open => self.open_with_label(arg, "打开文件失败"),
            CommandKind::OpenUrl => {
                let url = format!("https://{}", arg.trim());
                self.open_with_label(&url, "打开网址失败")
            }
            CommandKind::WebSearch => {
                let url = self.registry.format_search_url(DEFAULT_ENGINE, arg);
                self.open_with_label(&url, "搜索失败")
            }
        }
    }

    // open succeeds silently; only failures produce a reply line
    fn open_with_label(&self, target: &str, label: &str) -> Option<String> {
        match self.opener.open(target) {
            Ok(()) => None,
            Err(err) => Some(format!("{label}: {err:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Opener that records targets instead of spawning anything
    #[derive(Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
    }

    impl Opener for RecordingOpener {
        fn open(&self, target: &str) -> Result<()> {
            self.opened.borrow_mut().push(target.to_string());
            Ok(())
        }
    }

    /// Opener that always fails
    struct FailingOpener;

    impl Opener for FailingOpener {
        fn open(&self, _target: &str) -> Result<()> {
            anyhow::bail!("no handler registered")
        }
    }

    fn console() -> Console<'static, RecordingOpener> {
        Console::new(default_registry(), RecordingOpener::default())
    }

    #[test]
    fn test_md5_scenario() {
        let (step, reply) = console().respond("hash-md5 hello");
        assert_eq!(step, Step::Continue);
        assert!(reply.unwrap().contains("5d41402abc4b2a76b9719d911017c592"));
    }

    #[test]
    fn test_sha1_scenario() {
        let (_, reply) = console().respond("hash-sha1 hello");
        assert!(reply.unwrap().contains("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"));
    }

    #[test]
    fn test_argument_whitespace_collapsed() {
        let (_, reply) = console().respond("base64-encode hi there");
        assert!(reply.unwrap().contains("aGkgdGhlcmU="));

        // runs of whitespace collapse to single spaces
        let (_, reply) = console().respond("base64-encode hi \t  there");
        assert!(reply.unwrap().contains("aGkgdGhlcmU="));
    }

    #[test]
    fn test_base64_decode_error_is_recoverable() {
        let (step, reply) = console().respond("base64-decode !!!not-base64!!!");
        assert_eq!(step, Step::Continue);
        assert!(reply.unwrap().starts_with("base64解密失败: "));
    }

    #[test]
    fn test_url_decode_error_is_recoverable() {
        let (step, reply) = console().respond("url-decode %zz");
        assert_eq!(step, Step::Continue);
        assert!(reply.unwrap().starts_with("url解密失败: "));

        let (_, reply) = console().respond("url-decode trailing%2");
        assert!(reply.unwrap().starts_with("url解密失败: "));
    }

    #[test]
    fn test_unicode_decode_error_is_recoverable() {
        let (step, reply) = console().respond("unicode-decode \\uzz");
        assert_eq!(step, Step::Continue);
        assert!(reply.unwrap().starts_with("unicode解密失败: "));
    }

    #[test]
    fn test_unknown_verb_reported() {
        let (step, reply) = console().respond("unknown-verb x");
        assert_eq!(step, Step::Continue);
        assert_eq!(reply.unwrap(), "暂不支持该命令");
    }

    #[test]
    fn test_exit_token() {
        let (step, reply) = console().respond("exit");
        assert_eq!(step, Step::Exit);
        assert!(reply.is_none());

        let (step, _) = console().respond("  exit  ");
        assert_eq!(step, Step::Exit);
    }

    #[test]
    fn test_single_token_reports_insufficient() {
        let (step, reply) = console().respond("hash-md5");
        assert_eq!(step, Step::Continue);
        assert_eq!(reply.unwrap(), "参数不足");

        let (_, reply) = console().respond("");
        assert_eq!(reply.unwrap(), "参数不足");
    }

    #[test]
    fn test_web_search_opens_default_engine_url() {
        let console = console();
        let (step, reply) = console.respond("?? rust language");
        assert_eq!(step, Step::Continue);
        assert!(reply.is_none());

        let expected = console
            .registry
            .format_search_url(DEFAULT_ENGINE, "rust language");
        assert_eq!(*console.opener.opened.borrow(), vec![expected]);
    }

    #[test]
    fn test_open_url_prepends_scheme() {
        let console = console();
        console.respond("// github.com");
        assert_eq!(
            *console.opener.opened.borrow(),
            vec!["https://github.com".to_string()]
        );
    }

    #[test]
    fn test_open_passes_path_through() {
        let console = console();
        console.respond("open /tmp/notes.txt");
        assert_eq!(
            *console.opener.opened.borrow(),
            vec!["/tmp/notes.txt".to_string()]
        );
    }

    #[test]
    fn test_open_failure_is_recoverable() {
        let console = Console::new(default_registry(), FailingOpener);
        let (step, reply) = console.respond("open /missing");
        assert_eq!(step, Step::Continue);
        assert!(reply.unwrap().starts_with("打开文件失败: "));

        let (step, reply) = console.respond("?? anything");
        assert_eq!(step, Step::Continue);
        assert!(reply.unwrap().starts_with("搜索失败: "));

        let (_, reply) = console.respond("// example.com");
        assert!(reply.unwrap().starts_with("打开网址失败: "));
    }

    #[test]
    fn test_verbs_all_dispatch() {
        for (verb, _) in VERBS {
            assert!(CommandKind::from_verb(verb).is_some(), "{verb}");
        }
        assert!(CommandKind::from_verb("hash-MD5").is_none());
    }
}
