//! Plain-text rendering of view data.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use ocpanel_core::views::{
    ConfigData, DashboardData, LoginData, LogsData, MonitorData, ServerInfo, ServicesData,
    UsersData,
};
use ocpanel_core::ViewData;

/// Width log message previews are cut to
const LOG_PREVIEW_WIDTH: usize = 80;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "-".to_string(),
    }
}

/// Format seconds as `1d 2h 3m`
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;
    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

fn format_percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v))
        .unwrap_or_else(|| "-".to_string())
}

fn server_lines(out: &mut String, server: &ServerInfo) {
    let _ = writeln!(out, "Server:    {} ({})", server.name, server.version);
    let _ = writeln!(out, "Status:    {}", server.status);
    let _ = writeln!(out, "HTTP port: {}", server.http_port);
    let _ = writeln!(out, "Server ID: {}", server.unique_identifier);
}

fn login(out: &mut String, data: &LoginData) {
    server_lines(out, &data.server);
}

fn dashboard(out: &mut String, data: &DashboardData) {
    server_lines(out, &data.server);
    let _ = writeln!(out, "Time:      {}", format_time(data.server_time));
    let _ = writeln!(out, "Ping:      {:.1} ms", data.ping_ms);
}

fn services(out: &mut String, data: &ServicesData) {
    let _ = writeln!(out, "{}: {}", data.server_name, data.status);
}

fn monitor(out: &mut String, data: &MonitorData) {
    let _ = writeln!(out, "Connections:  {}", data.active_connections);
    let _ = writeln!(out, "Users:        {}", data.total_users);
    let _ = writeln!(out, "Messages/s:   {:.2}", data.messages_per_second);
    let _ = writeln!(out, "Uptime:       {}", format_uptime(data.uptime_seconds));
    let _ = writeln!(out, "CPU:          {}", format_percent(data.cpu_usage_percent));
    let _ = writeln!(out, "Memory:       {}", format_percent(data.memory_usage_percent));
    let _ = writeln!(out, "Disk:         {}", format_percent(data.disk_usage_percent));
    let _ = writeln!(out, "Sampled at:   {}", format_time(data.sampled_at));
}

fn logs(out: &mut String, data: &LogsData) {
    let _ = writeln!(
        out,
        "{} messages since {}",
        data.entries.len(),
        format_time(Some(data.since))
    );
    for entry in &data.entries {
        let sender = match (entry.is_announcement, entry.sender_id) {
            (true, _) => "announcement".to_string(),
            (false, Some(id)) => id.to_string(),
            (false, None) => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{:>8}  {}  {:<12}  {}",
            entry.msg_id,
            format_time(entry.time),
            sender,
            truncate_string(&entry.content.replace('\n', " "), LOG_PREVIEW_WIDTH)
        );
    }
    if data.truncated {
        let _ = writeln!(out, "(more messages not shown)");
    }
}

fn users(out: &mut String, data: &UsersData) {
    if data.roles.is_empty() {
        let _ = writeln!(out, "No server roles");
        return;
    }
    for role in &data.roles {
        let _ = writeln!(
            out,
            "{:>4}  {:<20}  {}",
            role.id,
            truncate_string(&role.name, 20),
            truncate_string(&role.description, 50)
        );
    }
}

fn config(out: &mut String, data: &ConfigData) {
    let text = match data.content {
        serde_json::Value::String(ref raw) => raw.clone(),
        ref value => serde_json::to_string_pretty(value).unwrap_or_default(),
    };
    let _ = writeln!(out, "{}", text);
}

pub fn render(data: &ViewData) -> String {
    let mut out = String::new();
    match data {
        ViewData::Login(data) => login(&mut out, data),
        ViewData::Dashboard(data) => dashboard(&mut out, data),
        ViewData::Services(data) => services(&mut out, data),
        ViewData::Monitor(data) => monitor(&mut out, data),
        ViewData::Logs(data) => logs(&mut out, data),
        ViewData::Users(data) => users(&mut out, data),
        ViewData::Config(data) => config(&mut out, data),
    }
    out
}
