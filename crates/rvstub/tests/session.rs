//! End-to-end tests over a loopback TCP connection.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rvstub::gdb::{ChecksumPolicy, GdbServer, ServerConfig, SessionSummary};
use rvstub::{BASE_ADDRESS, encode, target_xml};

fn start(config: ServerConfig) -> (TcpStream, JoinHandle<SessionSummary>) {
    let server = GdbServer::bind(config.with_addr("127.0.0.1:0")).expect("bind");
    let addr = server.local_addr().expect("local addr");
    let handle = thread::spawn(move || server.serve_one().expect("session"));
    let stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("read timeout");
    (stream, handle)
}

/// Send `request` and read exactly `expected.len()` bytes back.
fn exchange(stream: &mut TcpStream, request: &[u8], expected: &[u8]) {
    stream.write_all(request).expect("write");
    let mut buf = vec![0u8; expected.len()];
    stream.read_exact(&mut buf).expect("read reply");
    assert_eq!(
        buf.escape_ascii().to_string(),
        expected.escape_ascii().to_string()
    );
}

fn acked(payload: &str) -> Vec<u8> {
    let mut out = b"+".to_vec();
    out.extend(encode(payload));
    out
}

fn dump_with_pc(pc: u32) -> String {
    let pc_hex: String = pc.to_le_bytes().iter().map(|b| format!("{b:02x}")).collect();
    format!("{}{pc_hex}", "11111111".repeat(32))
}

#[test]
fn test_debugger_handshake_and_step() {
    let (mut stream, handle) = start(ServerConfig::default());

    exchange(&mut stream, b"$?#3f", b"+$S05#b8");
    exchange(&mut stream, b"$s#", b"+$S05#b8");
    exchange(&mut stream, b"$g#67", &acked(&dump_with_pc(BASE_ADDRESS + 4)));

    drop(stream);
    let summary = handle.join().expect("server thread");
    assert_eq!(summary.steps, 1);
    assert_eq!(summary.packets, 3);
    assert_eq!(summary.final_pc, 0x28);
}

#[test]
fn test_gdb_attach_sequence() {
    let (mut stream, handle) = start(ServerConfig::default());

    let supported = encode("qSupported:multiprocess+;swbreak+;hwbreak+;qRelocInsn+");
    exchange(&mut stream, &supported, &acked("PacketSize=120"));
    // Client acks our reply; nothing comes back for it
    stream.write_all(b"+").expect("write ack");

    let xml_request = encode("qXfer:features:read:target.xml:0,ffb");
    exchange(&mut stream, &xml_request, &acked(target_xml()));

    exchange(&mut stream, &encode("vCont?"), b"+$#00");
    exchange(&mut stream, &encode("qTStatus"), b"+$#00");
    exchange(&mut stream, &encode("?"), b"+$S05#b8");

    drop(stream);
    let summary = handle.join().expect("server thread");
    assert_eq!(summary.packets, 5);
    assert_eq!(summary.steps, 0);
}

#[test]
fn test_steps_accumulate() {
    let (mut stream, handle) = start(ServerConfig::default());

    for _ in 0..5 {
        exchange(&mut stream, &encode("s"), b"+$S05#b8");
    }
    exchange(&mut stream, &encode("?"), b"+$S05#b8");
    exchange(&mut stream, &encode("g"), &acked(&dump_with_pc(BASE_ADDRESS + 20)));

    drop(stream);
    assert_eq!(handle.join().expect("server thread").final_pc, BASE_ADDRESS + 20);
}

#[test]
fn test_bad_checksum_gets_nack() {
    let (mut stream, handle) = start(ServerConfig::default());

    exchange(&mut stream, b"$s#00", b"-");
    // Retransmission with the right checksum is served normally
    exchange(&mut stream, b"$s#73", b"+$S05#b8");

    drop(stream);
    let summary = handle.join().expect("server thread");
    assert_eq!(summary.checksum_rejects, 1);
    assert_eq!(summary.steps, 1);
}

#[test]
fn test_ignore_checksum_policy() {
    let (mut stream, handle) =
        start(ServerConfig::default().with_checksum_policy(ChecksumPolicy::Ignore));

    exchange(&mut stream, b"$s#00", b"+$S05#b8");

    drop(stream);
    assert_eq!(handle.join().expect("server thread").steps, 1);
}

#[test]
fn test_custom_entry() {
    let (mut stream, handle) = start(ServerConfig::default().with_entry(0x8000_0000));

    exchange(&mut stream, &encode("s"), b"+$S05#b8");
    exchange(&mut stream, &encode("g"), &acked(&dump_with_pc(0x8000_0004)));

    drop(stream);
    assert_eq!(handle.join().expect("server thread").final_pc, 0x8000_0004);
}

#[test]
fn test_sessions_get_fresh_state() {
    let server = GdbServer::bind(ServerConfig::default().with_addr("127.0.0.1:0")).expect("bind");
    let addr = server.local_addr().expect("local addr");
    let handle = thread::spawn(move || {
        let first = server.serve_one().expect("first session");
        let second = server.serve_one().expect("second session");
        (first, second)
    });

    let mut stream = TcpStream::connect(addr).expect("connect");
    exchange(&mut stream, &encode("s"), b"+$S05#b8");
    drop(stream);

    let mut stream = TcpStream::connect(addr).expect("connect");
    exchange(&mut stream, &encode("g"), &acked(&dump_with_pc(BASE_ADDRESS)));
    drop(stream);

    let (first, second) = handle.join().expect("server thread");
    assert_eq!(first.final_pc, BASE_ADDRESS + 4);
    assert_eq!(second.final_pc, BASE_ADDRESS);
}
