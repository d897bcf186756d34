use std::io::{self, Read};
use std::os::unix::net::UnixStream;
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, ExitStatus};

use signal_hook::consts::SIGCHLD;

enum ChildState {
    Running,
    Stopped(libc::c_int),
    Done(ExitStatus),
}

/// Blocks until `child` has exited or been killed by a signal.
pub fn wait_for_exit(child: Child) -> io::Result<ExitStatus> {
    wait_for_all(vec![child])?
        .into_iter()
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "no status collected"))
}

/// Blocks until every child has exited or been killed, returning their
/// statuses in the order given.
///
/// Job control is not supported: whenever any of the children is seen
/// stopped (its own SIGSTOP, or a terminal SIGTSTP hitting the foreground
/// group), every child still running gets SIGCONT. The children are
/// watched together, so a stopped consumer is noticed even while the
/// producer is blocked writing into the pipe.
pub fn wait_for_all(children: Vec<Child>) -> io::Result<Vec<ExitStatus>> {
    let pids: Vec<libc::pid_t> = children.iter().map(|c| c.id() as libc::pid_t).collect();
    // Reaped below through waitpid; `Child` itself never waits.
    drop(children);

    // Self-pipe: the handler writes a byte on every SIGCHLD.
    let (wakeup, notifier) = UnixStream::pair()?;
    let sig_id = signal_hook::low_level::pipe::register(SIGCHLD, notifier)?;
    let result = reap(&pids, &wakeup);
    signal_hook::low_level::unregister(sig_id);
    result
}

fn reap(pids: &[libc::pid_t], mut wakeup: &UnixStream) -> io::Result<Vec<ExitStatus>> {
    let mut statuses: Vec<Option<ExitStatus>> = vec![None; pids.len()];

    loop {
        let mut any_stopped = false;
        for (&pid, slot) in pids.iter().zip(statuses.iter_mut()) {
            if slot.is_some() {
                continue;
            }
            match poll(pid)? {
                ChildState::Running => {}
                ChildState::Stopped(signal) => {
                    log::debug!("pid {} stopped by signal {}, resuming", pid, signal);
                    any_stopped = true;
                }
                ChildState::Done(status) => *slot = Some(status),
            }
        }

        if any_stopped {
            for (&pid, _) in pids.iter().zip(&statuses).filter(|(_, s)| s.is_none()) {
                if unsafe { libc::kill(pid, libc::SIGCONT) } == -1 {
                    return Err(io::Error::last_os_error());
                }
            }
        }

        if statuses.iter().all(Option::is_some) {
            return Ok(statuses.into_iter().flatten().collect());
        }

        // A SIGCHLD landing after the poll above has already written its
        // byte, so this read cannot miss it.
        let mut buf = [0u8; 64];
        match wakeup.read(&mut buf) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}

fn poll(pid: libc::pid_t) -> io::Result<ChildState> {
    loop {
        let mut status: libc::c_int = 0;
        let ret = unsafe { libc::waitpid(pid, &mut status, libc::WUNTRACED | libc::WNOHANG) };
        if ret == -1 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if ret == 0 {
            return Ok(ChildState::Running);
        }
        if libc::WIFEXITED(status) || libc::WIFSIGNALED(status) {
            return Ok(ChildState::Done(ExitStatus::from_raw(status)));
        }
        if libc::WIFSTOPPED(status) {
            return Ok(ChildState::Stopped(libc::WSTOPSIG(status)));
        }
        return Ok(ChildState::Running);
    }
}
