use std::io;
use std::os::fd::{FromRawFd, OwnedFd};
use std::process::Stdio;

/// Both ends of a fresh anonymous pipe.
///
/// Each end is an `OwnedFd`, so whichever end is not handed to a child is
/// closed as soon as it goes out of scope. Both ends carry `FD_CLOEXEC`;
/// only the copy duplicated onto a child's stdin or stdout survives exec.
#[derive(Debug)]
pub struct Pipe {
    pub reader: OwnedFd,
    pub writer: OwnedFd,
}

impl Pipe {
    pub fn new() -> io::Result<Self> {
        let fds = open_pipe()?;
        // Owned from here on, so early returns still close both ends.
        let (reader, writer) = unsafe { (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])) };
        #[cfg(not(any(target_os = "linux", target_os = "android")))]
        {
            set_cloexec(&reader)?;
            set_cloexec(&writer)?;
        }
        Ok(Self { reader, writer })
    }

    pub fn into_stdio(self) -> (Stdio, Stdio) {
        (Stdio::from(self.reader), Stdio::from(self.writer))
    }
}

// pipe2 sets the flag atomically, so a fork racing on another thread
// cannot inherit an inheritable copy.
#[cfg(any(target_os = "linux", target_os = "android"))]
fn open_pipe() -> io::Result<[libc::c_int; 2]> {
    let mut fds = [0 as libc::c_int; 2];
    if unsafe { libc::pipe2(fds.as_mut_ptr(), libc::O_CLOEXEC) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(fds)
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn open_pipe() -> io::Result<[libc::c_int; 2]> {
    let mut fds = [0 as libc::c_int; 2];
    if unsafe { libc::pipe(fds.as_mut_ptr()) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(fds)
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn set_cloexec(fd: &OwnedFd) -> io::Result<()> {
    use std::os::fd::AsRawFd;

    let raw = fd.as_raw_fd();
    let flags = unsafe { libc::fcntl(raw, libc::F_GETFD) };
    if flags == -1 || unsafe { libc::fcntl(raw, libc::F_SETFD, flags | libc::FD_CLOEXEC) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::{Read, Write};
    use std::os::fd::AsRawFd;

    #[test]
    fn test_pipe_carries_bytes() {
        let pipe = Pipe::new().unwrap();
        let mut writer = File::from(pipe.writer);
        let mut reader = File::from(pipe.reader);

        writer.write_all(b"through the pipe\n").unwrap();
        drop(writer);

        let mut received = String::new();
        reader.read_to_string(&mut received).unwrap();
        assert_eq!(received, "through the pipe\n");
    }

    #[test]
    fn test_pipe_ends_are_cloexec() {
        let pipe = Pipe::new().unwrap();
        for fd in [&pipe.reader, &pipe.writer] {
            let flags = unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_GETFD) };
            assert_ne!(flags & libc::FD_CLOEXEC, 0);
        }
    }

    #[test]
    fn test_reader_sees_eof_once_writer_dropped() {
        let pipe = Pipe::new().unwrap();
        drop(pipe.writer);
        let mut reader = File::from(pipe.reader);
        let mut buf = Vec::new();
        assert_eq!(reader.read_to_end(&mut buf).unwrap(), 0);
    }
}
