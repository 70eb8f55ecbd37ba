//! Run a non-interactive command while relaying its output line by line.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;

use flume::Sender;

use crate::constants::defaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Succeeded,
    Failed(i32),
}

impl RunState {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunState::Failed(code) => *code,
            _ => 0,
        }
    }
}

struct RelayDone {
    name: &'static str,
    result: io::Result<u64>,
}

pub struct GuardedCommand {
    argv: Vec<String>,
    state: RunState,
}

impl GuardedCommand {
    pub fn new(argv: Vec<String>) -> Self {
        GuardedCommand {
            argv,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// The command line as a single string, for messages.
    pub fn command_line(&self) -> String {
        self.argv.join(" ")
    }

    /// Run the command to completion, relaying its stdout and stderr to ours.
    ///
    /// A command that cannot be started at all counts as failed with
    /// exit code 127.
    pub fn run(&mut self) -> RunState {
        self.state = RunState::Running;
        self.state = match self.spawn_and_relay() {
            Ok(status) => classify(status),
            Err(e) => {
                log::error!("Could not run '{}': {e}", self.command_line());
                RunState::Failed(defaults::SPAWN_FAILURE_CODE)
            }
        };
        log::info!("Exit code {}", self.state.exit_code());
        self.state
    }

    fn spawn_and_relay(&self) -> io::Result<ExitStatus> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;

        let mut child = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        log::debug!("Started '{}' as pid {}", self.command_line(), child.id());

        let (done_tx, done_rx) = flume::unbounded();
        if let Some(stdout) = child.stdout.take() {
            if let Err(e) = spawn_relay("stdout", stdout, io::stdout(), done_tx.clone()) {
                return Err(abort_child(&mut child, e));
            }
        }
        if let Some(stderr) = child.stderr.take() {
            if let Err(e) = spawn_relay("stderr", stderr, io::stderr(), done_tx.clone()) {
                return Err(abort_child(&mut child, e));
            }
        }
        // Channel disconnects once both relays have reported (or died)
        drop(done_tx);
        for done in done_rx.iter() {
            match done.result {
                Ok(lines) => log::debug!("{} relayed {lines} lines", done.name),
                Err(e) => log::warn!("{} relay stopped early: {e}", done.name),
            }
        }

        child.wait()
    }
}

/// Kill and reap a child whose output can no longer be relayed, passing `err` on.
fn abort_child(child: &mut Child, err: io::Error) -> io::Error {
    log::error!("Stopping pid {}: {err}", child.id());
    if let Err(e) = child.kill() {
        log::warn!("Could not kill pid {}: {e}", child.id());
    }
    match child.wait() {
        Ok(status) => log::debug!("pid {} ended with {status}", child.id()),
        Err(e) => log::warn!("Could not reap pid {}: {e}", child.id()),
    }
    err
}

fn classify(status: ExitStatus) -> RunState {
    match status.code() {
        Some(code) if code > 0 => RunState::Failed(code),
        Some(_) => RunState::Succeeded,
        None => {
            log::warn!("Command terminated without an exit code ({status})");
            RunState::Succeeded
        }
    }
}

fn spawn_relay<R, W>(
    name: &'static str,
    pipe: R,
    dest: W,
    done: Sender<RelayDone>,
) -> io::Result<thread::JoinHandle<()>>
where
    R: Read + Send + 'static,
    W: Write + Send + 'static,
{
    thread::Builder::new()
        .name(format!("relay-{name}"))
        .spawn(move || {
            let result = relay_lines(name, pipe, dest);
            done.send(RelayDone { name, result }).ok();
        })
}

/// Copy `pipe` to `dest` a line at a time, flushing after each line.
pub fn relay_lines<R: Read, W: Write>(name: &str, pipe: R, mut dest: W) -> io::Result<u64> {
    let mut reader = BufReader::new(pipe);
    let mut line = Vec::new();
    let mut count = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        log::trace!("{name} {}: {}", line.len(), String::from_utf8_lossy(&line).trim_end());
        dest.write_all(&line)?;
        dest.flush()?;
        count += 1;
    }

    log::info!("{name} closed");
    Ok(count)
}
