//! Users, kills, kicks and the services hooks they drive.

mod common;

use common::{Event, HUB, ME, add_local_client, add_user, synced};
use ngircd_link::InfoQuery;
use ngircd_link::modes::UserModes;

#[test]
fn nick_introduction_applies_modes_and_notifies() {
    let (mut uplink, _capture) = synced();
    uplink.process_line(&format!(
        ":{HUB} NICK alice 1 ~alice host.example 1 +io :Alice Liddell"
    ));

    let user = uplink.session().network.user("ALICE").unwrap();
    assert_eq!(user.nick, "alice");
    assert_eq!(user.user, "~alice");
    assert_eq!(user.gecos, "Alice Liddell");
    assert_eq!(user.server, HUB);
    assert_eq!(user.modes, UserModes::INVISIBLE | UserModes::OPER);
    assert!(
        uplink
            .hooks()
            .events
            .contains(&Event::NickChange("alice".to_string()))
    );
}

#[test]
fn nick_change_to_registered_nick_sets_plus_r() {
    let (mut uplink, capture) = synced();
    add_user(&mut uplink, "guest");
    uplink.process_line(":guest JOIN #chan");
    uplink.hooks_mut().registered.push("alice".to_string());
    capture.take();

    uplink.process_line(":guest NICK alice :1700000000");

    assert_eq!(capture.take(), vec![":NickServ MODE alice +R".to_string()]);
    let network = &uplink.session().network;
    assert!(network.user("guest").is_none());
    assert_eq!(network.user("alice").unwrap().ts, 1_700_000_000);
    assert!(network.is_member("#chan", "alice"));
    assert!(!network.is_member("#chan", "guest"));
}

#[test]
fn nick_change_away_from_registered_nick_clears_plus_r() {
    let (mut uplink, capture) = synced();
    add_user(&mut uplink, "alice");
    capture.take();

    uplink.process_line(":alice NICK alice_ :1700000000");
    assert_eq!(capture.take(), vec![":NickServ MODE alice_ -R".to_string()]);
}

#[test]
fn case_only_nick_change_sends_nothing() {
    let (mut uplink, capture) = synced();
    add_user(&mut uplink, "alice");
    capture.take();

    uplink.process_line(":alice NICK Alice :1700000000");
    assert!(capture.is_empty());
    assert_eq!(uplink.session().network.user("alice").unwrap().nick, "Alice");
}

#[test]
fn nick_collision_is_dropped() {
    let (mut uplink, capture) = synced();
    add_user(&mut uplink, "alice");
    add_user(&mut uplink, "bob");
    capture.take();

    uplink.process_line(":bob NICK alice :1700000000");
    assert!(capture.is_empty());
    assert!(uplink.session().network.user("bob").is_some());
}

#[test]
fn server_cannot_rename_users() {
    let (mut uplink, _capture) = synced();
    add_user(&mut uplink, "alice");
    uplink.process_line(&format!(":{HUB} NICK bob :1700000000"));
    assert!(uplink.session().network.user("bob").is_none());
}

#[test]
fn quit_and_kill_remove_remote_users() {
    let (mut uplink, _capture) = synced();
    add_user(&mut uplink, "alice");
    add_user(&mut uplink, "bob");

    uplink.process_line(":alice QUIT :Leaving");
    uplink.process_line(&format!(":{HUB} KILL bob"));

    assert!(uplink.session().network.user("alice").is_none());
    assert!(uplink.session().network.user("bob").is_none());
}

#[test]
fn killed_service_client_is_reintroduced_with_channels() {
    let (mut uplink, capture) = synced();
    add_local_client(&mut uplink, "ChanServ");
    uplink.join("#help", "ChanServ");
    capture.take();

    uplink.process_line(&format!(":{HUB} KILL ChanServ :oper (testing)"));

    let lines = capture.take();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(&format!(":{ME} NICK ChanServ 1 service services.int 1 ")));
    assert_eq!(lines[1], format!(":{ME} NJOIN #help :@ChanServ"));
    assert!(uplink.session().network.user("ChanServ").is_some());
}

#[test]
fn kicked_service_client_rejoins() {
    let (mut uplink, capture) = synced();
    add_local_client(&mut uplink, "ChanServ");
    add_user(&mut uplink, "alice");
    uplink.process_line(":alice JOIN #help");
    uplink.join("#help", "ChanServ");
    capture.take();

    uplink.process_line(":alice KICK #help ChanServ :begone");

    assert_eq!(capture.take(), vec![format!(":{ME} NJOIN #help :@ChanServ")]);
    assert!(uplink.session().network.is_member("#help", "ChanServ"));
}

#[test]
fn kicked_user_leaves_channel() {
    let (mut uplink, capture) = synced();
    add_user(&mut uplink, "alice");
    add_user(&mut uplink, "bob");
    uplink.process_line(":alice JOIN #chan");
    uplink.process_line(":bob JOIN #chan");
    capture.take();

    uplink.process_line(":alice KICK #chan bob :out");
    assert!(!uplink.session().network.is_member("#chan", "bob"));
    assert!(capture.is_empty());
}

#[test]
fn topic_is_recorded_with_source_as_setter() {
    let (mut uplink, _capture) = synced();
    add_user(&mut uplink, "alice");
    uplink.process_line(":alice JOIN #chan");

    uplink.process_line(":alice TOPIC #chan :Hello world");

    let topic = uplink
        .session()
        .network
        .channel("#chan")
        .unwrap()
        .topic
        .clone()
        .unwrap();
    assert_eq!(topic.text, "Hello world");
    assert_eq!(topic.set_by, "alice");
    assert!(uplink.hooks().events.contains(&Event::Topic {
        channel: "#chan".to_string(),
        text: "Hello world".to_string(),
    }));
}

#[test]
fn away_toggles_flag_and_notifies() {
    let (mut uplink, _capture) = synced();
    add_user(&mut uplink, "alice");

    uplink.process_line(":alice AWAY :Gone fishing");
    assert!(uplink.session().network.user("alice").unwrap().is_away());

    uplink.process_line(":alice AWAY");
    assert!(!uplink.session().network.user("alice").unwrap().is_away());

    let away: Vec<_> = uplink
        .hooks()
        .events
        .iter()
        .filter(|e| matches!(e, Event::Away { .. }))
        .cloned()
        .collect();
    assert_eq!(
        away,
        vec![
            Event::Away {
                nick: "alice".to_string(),
                message: Some("Gone fishing".to_string()),
            },
            Event::Away {
                nick: "alice".to_string(),
                message: None,
            },
        ]
    );
}

#[test]
fn messages_reach_the_services_core() {
    let (mut uplink, _capture) = synced();
    add_user(&mut uplink, "alice");

    uplink.process_line(":alice PRIVMSG NickServ :help");
    uplink.process_line(":alice NOTICE NickServ :ping");
    uplink.process_line(":alice PRIVMSG NickServ extra :words");

    let messages: Vec<_> = uplink
        .hooks()
        .events
        .iter()
        .filter(|e| matches!(e, Event::Message { .. }))
        .cloned()
        .collect();
    assert_eq!(
        messages,
        vec![
            Event::Message {
                source: "alice".to_string(),
                target: "NickServ".to_string(),
                text: "help".to_string(),
                notice: false,
            },
            Event::Message {
                source: "alice".to_string(),
                target: "NickServ".to_string(),
                text: "ping".to_string(),
                notice: true,
            },
        ]
    );
}

#[test]
fn queries_are_forwarded() {
    let (mut uplink, _capture) = synced();
    add_user(&mut uplink, "alice");

    uplink.process_line(&format!(":alice STATS u {ME}"));
    uplink.process_line(&format!(":alice WHOIS {ME} NickServ"));
    uplink.process_line(&format!(":alice TRACE {ME}"));
    uplink.process_line(&format!(":alice VERSION {ME}"));
    uplink.process_line(&format!(":alice MOTD {ME}"));

    let queries: Vec<_> = uplink
        .hooks()
        .events
        .iter()
        .filter_map(|e| match e {
            Event::Query { nick, query } if nick == "alice" => Some(query.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        queries,
        vec![
            InfoQuery::Stats('u'),
            InfoQuery::Whois("NickServ".to_string()),
            InfoQuery::Trace {
                target: ME.to_string(),
                dest: None,
            },
            InfoQuery::Version,
            InfoQuery::Motd,
        ]
    );
}

#[test]
fn queries_from_servers_are_rejected() {
    let (mut uplink, _capture) = synced();
    uplink.process_line(&format!(":{HUB} VERSION {ME}"));
    assert!(
        !uplink
            .hooks()
            .events
            .iter()
            .any(|e| matches!(e, Event::Query { .. }))
    );
}

#[test]
fn registry_counts_dispatched_commands() {
    let (mut uplink, _capture) = synced();
    add_user(&mut uplink, "alice");
    add_user(&mut uplink, "bob");
    uplink.process_line(":alice AWAY :x");

    let stats = uplink.registry().command_stats();
    assert_eq!(stats[0], ("NICK", 2));
    assert!(stats.contains(&("AWAY", 1)));
    assert!(stats.contains(&("PASS", 1)));
    assert!(stats.contains(&("SERVER", 1)));
    assert!(stats.contains(&("PONG", 1)));
    assert_eq!(uplink.registry().len(), 26);
}
