//! Default value functions for configuration.

pub fn default_numeric() -> String {
    "1".to_string()
}

pub fn default_protocol() -> String {
    "ngircd".to_string()
}

pub fn default_ping_interval() -> u64 {
    120
}

pub fn default_nickserv() -> String {
    "NickServ".to_string()
}

pub fn default_service_host() -> String {
    "services.int".to_string()
}
