//! Listening socket setup

use std::net::SocketAddr;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

const BACKLOG: i32 = 1024;

/// Bind a listener on `addr`.
///
/// For IPv6 addresses `v6only` controls whether IPv4 clients are also
/// accepted; `None` leaves the operating system default in place. On Linux the
/// address need not be assigned to an interface yet.
pub fn bind(addr: SocketAddr, v6only: Option<bool>) -> std::io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    if let (true, Some(only)) = (addr.is_ipv6(), v6only) {
        socket.set_only_v6(only)?;
    }
    socket.set_reuse_address(true)?;
    // Allow binding before the address is configured, e.g. early at boot
    #[cfg(target_os = "linux")]
    {
        if addr.is_ipv6() {
            socket.set_freebind_ipv6(true)?;
        } else {
            socket.set_freebind(true)?;
        }
    }
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;
    socket.set_nonblocking(true)?;
    TcpListener::from_std(socket.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_ipv4() {
        let listener = bind("127.0.0.1:0".parse().unwrap(), None).unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(addr.is_ipv4());
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_v6only_ignored_for_ipv4() {
        assert!(bind("127.0.0.1:0".parse().unwrap(), Some(true)).is_ok());
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_bind_unassigned_address() {
        // TEST-NET-1, never configured on a real host
        let listener = bind("192.0.2.123:0".parse().unwrap(), None).unwrap();
        assert_eq!(
            listener.local_addr().unwrap().ip().to_string(),
            "192.0.2.123"
        );
    }
}
