//! Link establishment: PASS/SERVER exchange, end-of-burst detection, splits.

mod common;

use common::{Event, HUB, ME, add_user, linked, synced, uplink};
use ngircd_link::network::LineReader;
use ngircd_link::sync::SyncState;

#[test]
fn login_sends_pass_then_server_and_starts_burst() {
    let (mut uplink, capture) = uplink();
    uplink.connect().unwrap();

    let lines = capture.take();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("PASS out-secret 0210-IRC+ ngircd-link|"));
    assert!(lines[0].ends_with(":CLo"));
    assert_eq!(lines[1], format!("SERVER {ME} 1 :Example services"));

    assert_eq!(uplink.session().burst.state(), SyncState::Bursting);
    assert_eq!(uplink.hooks().events, vec![Event::Init]);
}

#[test]
fn uplink_server_is_answered_with_self_ping() {
    let (mut uplink, capture) = uplink();
    uplink.connect().unwrap();
    capture.take();

    uplink.process_line("PASS in-secret 0210-IRC+ ngIRCd|26:CHLMSXZ PZ");
    uplink.process_line(&format!("SERVER {HUB} 1 :Hub server"));

    assert_eq!(capture.take(), vec![format!(":{ME} PING :{ME}")]);
    assert!(uplink.session().is_uplink(HUB));
    let hub = uplink.session().network.server(HUB).unwrap();
    assert_eq!(hub.description, "Hub server");
    assert!(hub.uplink.is_none());
    assert!(!hub.eob);
}

#[test]
fn uplink_pong_finishes_burst_once() {
    let (mut uplink, capture) = linked();

    uplink.process_line(&format!(":{HUB} PONG {HUB} :{ME}"));
    let lines = capture.take();
    assert_eq!(lines.len(), 1);
    assert!(
        lines[0].starts_with(&format!(":{ME} WALLOPS :Finished synchronizing with network in ")),
        "{}",
        lines[0]
    );
    assert_eq!(uplink.session().burst.state(), SyncState::Synchronized);
    assert!(uplink.session().network.server(HUB).unwrap().eob);
    assert!(uplink.session().uplink_pong.is_some());
    assert_eq!(
        uplink
            .hooks()
            .events
            .iter()
            .filter(|e| matches!(e, Event::Eob(_)))
            .count(),
        1
    );

    uplink.process_line(&format!(":{HUB} PONG {HUB} :{ME}"));
    assert!(capture.is_empty());
    assert_eq!(uplink.session().burst.state(), SyncState::Synchronized);
    assert_eq!(
        uplink
            .hooks()
            .events
            .iter()
            .filter(|e| matches!(e, Event::Eob(_)))
            .count(),
        1
    );
}

#[test]
fn remote_server_is_pinged_and_its_pong_only_marks_eob() {
    let (mut uplink, capture) = linked();

    uplink.process_line(&format!(":{HUB} SERVER leaf.example.net 2 3 :Leaf server"));
    assert_eq!(capture.take(), vec![format!(":{ME} PING leaf.example.net")]);
    let leaf = uplink.session().network.server("leaf.example.net").unwrap();
    assert_eq!(leaf.uplink.as_deref(), Some(HUB));
    assert_eq!(leaf.hops, 2);

    uplink.process_line(":leaf.example.net PONG leaf.example.net :services.example.net");
    assert!(capture.is_empty());
    assert!(uplink.session().network.server("leaf.example.net").unwrap().eob);
    assert_eq!(uplink.session().burst.state(), SyncState::Bursting);
    assert!(
        uplink
            .hooks()
            .events
            .contains(&Event::Eob("leaf.example.net".to_string()))
    );
}

#[test]
fn password_mismatch_shuts_down_and_drops_later_lines() {
    let (mut uplink, capture) = uplink();
    uplink.connect().unwrap();
    capture.take();

    uplink.process_line("PASS wrong 0210-IRC+ ngIRCd|26:CHLMSXZ PZ");
    assert!(uplink.shutdown_requested());

    uplink.process_line(&format!("SERVER {HUB} 1 :Hub server"));
    uplink.process_line("PASS wrong 0210-IRC+ ngIRCd|26:CHLMSXZ PZ");
    assert!(uplink.shutdown_requested());
    assert!(!uplink.session().is_registered());
    assert!(capture.is_empty());
}

#[test]
fn ping_is_answered_with_pong() {
    let (mut uplink, capture) = synced();
    uplink.process_line(&format!(":{HUB} PING :{HUB}"));
    assert_eq!(capture.take(), vec![format!(":{ME} PONG {HUB}")]);
}

#[test]
fn squit_removes_downstream_servers_and_users() {
    let (mut uplink, _capture) = synced();
    uplink.process_line(&format!(":{HUB} SERVER leaf.example.net 2 3 :Leaf"));
    uplink.process_line(":leaf.example.net SERVER edge.example.net 3 4 :Edge");
    uplink.process_line(":edge.example.net NICK carol 1 ~carol edge.host 1 + :Carol");
    uplink.process_line(":leaf.example.net NICK dave 1 ~dave leaf.host 1 + :Dave");
    add_user(&mut uplink, "alice");
    uplink.process_line(":carol JOIN #split");

    uplink.process_line(&format!(":{HUB} SQUIT leaf.example.net :net split"));

    let network = &uplink.session().network;
    assert!(network.server("leaf.example.net").is_none());
    assert!(network.server("edge.example.net").is_none());
    assert!(network.user("carol").is_none());
    assert!(network.user("dave").is_none());
    assert!(network.user("alice").is_some());
    assert!(network.channel("#split").is_none());
}

#[test]
fn uplink_squit_resets_the_session() {
    let (mut uplink, _capture) = synced();
    add_user(&mut uplink, "alice");

    uplink.process_line(&format!(":{HUB} SQUIT {HUB} :bye"));
    assert!(!uplink.session().is_registered());
    assert!(uplink.session().network.user("alice").is_none());
    assert_eq!(uplink.session().burst.state(), SyncState::Idle);
}

#[test]
fn link_closed_returns_to_idle() {
    let (mut uplink, _capture) = linked();
    add_user(&mut uplink, "alice");

    uplink.link_closed();
    assert_eq!(uplink.session().burst.state(), SyncState::Idle);
    assert!(uplink.session().network.users().next().is_none());
    assert!(uplink.session().network.servers().next().is_none());
}

#[test]
fn unknown_commands_and_malformed_lines_are_ignored() {
    let (mut uplink, capture) = synced();
    uplink.process_line(&format!(":{HUB} WHATEVER a b c"));
    uplink.process_line(":only.a.prefix");
    uplink.process_line("");
    uplink.process_line(":nobody.example.net PING :x");
    assert!(capture.is_empty());
}

#[tokio::test]
async fn latin1_line_does_not_stall_the_link() {
    let (mut uplink, capture) = linked();
    let mut wire = format!(":{HUB} NICK bob 1 ~bob host.example 1 + :Ren").into_bytes();
    wire.extend_from_slice(b"\xe9\r\n");
    wire.extend_from_slice(format!(":{HUB} PONG {HUB} :{ME}\r\n").as_bytes());

    let mut reader = LineReader::new(wire.as_slice());
    while let Some(line) = reader.next_line().await.unwrap() {
        uplink.process_line(&line);
    }

    let bob = uplink.session().network.user("bob").unwrap();
    assert_eq!(bob.gecos, "Ren\u{FFFD}");
    assert_eq!(uplink.session().burst.state(), SyncState::Synchronized);
    assert_eq!(capture.take().len(), 1);
}
