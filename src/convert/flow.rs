//! Rendering of converted components in the flow configuration syntax.

use crate::component::http::{Authorization, BasicAuth, HttpClientConfig, OAuth2Config, TlsConfig};
use crate::component::scrape;
use crate::convert::Component;
use crate::secret::Secret;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

/// Renders `components` as flow blocks, separated by blank lines.
///
/// Attributes matching the component defaults are left out, except for
/// `targets`, `forward_to` and `job_name`.
pub fn render(components: &[Component]) -> String {
    let mut writer = BlockWriter::default();

    for (index, component) in components.iter().enumerate() {
        if index > 0 {
            writer.blank_line();
        }
        writer.begin_block(&component.name, Some(&component.label));
        write_scrape_arguments(&mut writer, &component.arguments);
        writer.end_block();
    }

    writer.finish()
}

fn write_scrape_arguments(w: &mut BlockWriter, args: &scrape::Arguments) {
    let defaults = scrape::Arguments::default();

    w.raw_attr("targets", &targets_expr(&args.targets, w.indent));
    w.raw_attr("forward_to", &format!("[{}]", args.forward_to.join(", ")));
    w.string_attr("job_name", &args.job_name);

    if args.honor_labels != defaults.honor_labels {
        w.bool_attr("honor_labels", args.honor_labels);
    }
    if args.honor_timestamps != defaults.honor_timestamps {
        w.bool_attr("honor_timestamps", args.honor_timestamps);
    }
    if !args.params.is_empty() {
        w.raw_attr("params", &params_expr(&args.params, w.indent));
    }
    if args.scrape_interval != defaults.scrape_interval {
        w.string_attr("scrape_interval", &format_duration(args.scrape_interval));
    }
    if args.scrape_timeout != defaults.scrape_timeout {
        w.string_attr("scrape_timeout", &format_duration(args.scrape_timeout));
    }
    if args.metrics_path != defaults.metrics_path {
        w.string_attr("metrics_path", &args.metrics_path);
    }
    if args.scheme != defaults.scheme {
        w.string_attr("scheme", &args.scheme);
    }

    let limits = [
        ("body_size_limit", args.body_size_limit),
        ("sample_limit", args.sample_limit),
        ("target_limit", args.target_limit),
        ("label_limit", args.label_limit),
        ("label_name_length_limit", args.label_name_length_limit),
        ("label_value_length_limit", args.label_value_length_limit),
    ];
    for (name, value) in limits {
        if value != 0 {
            w.raw_attr(name, &value.to_string());
        }
    }

    if args.extra_metrics != defaults.extra_metrics {
        w.bool_attr("extra_metrics", args.extra_metrics);
    }

    write_http_client_config(w, &args.http_client_config);

    if args.clustering != defaults.clustering {
        w.begin_block("clustering", None);
        w.bool_attr("enabled", args.clustering.enabled);
        w.end_block();
    }
}

fn write_http_client_config(w: &mut BlockWriter, config: &HttpClientConfig) {
    let defaults = HttpClientConfig::default();

    if let Some(token) = &config.bearer_token {
        w.secret_attr("bearer_token", token);
    }
    if let Some(file) = &config.bearer_token_file {
        w.string_attr("bearer_token_file", file);
    }
    if let Some(proxy_url) = &config.proxy_url {
        w.string_attr("proxy_url", proxy_url.as_str());
    }
    if config.follow_redirects != defaults.follow_redirects {
        w.bool_attr("follow_redirects", config.follow_redirects);
    }
    if config.enable_http2 != defaults.enable_http2 {
        w.bool_attr("enable_http2", config.enable_http2);
    }

    if let Some(basic_auth) = &config.basic_auth {
        write_basic_auth(w, basic_auth);
    }
    if let Some(authorization) = &config.authorization {
        write_authorization(w, authorization);
    }
    if let Some(oauth2) = &config.oauth2 {
        write_oauth2(w, oauth2);
    }
    write_tls_config(w, &config.tls_config);
}

fn write_basic_auth(w: &mut BlockWriter, basic_auth: &BasicAuth) {
    w.begin_block("basic_auth", None);
    w.string_attr("username", &basic_auth.username);
    if let Some(password) = &basic_auth.password {
        w.secret_attr("password", password);
    }
    if let Some(file) = &basic_auth.password_file {
        w.string_attr("password_file", file);
    }
    w.end_block();
}

fn write_authorization(w: &mut BlockWriter, authorization: &Authorization) {
    w.begin_block("authorization", None);
    w.string_attr("type", &authorization.kind);
    if let Some(credentials) = &authorization.credentials {
        w.secret_attr("credentials", credentials);
    }
    if let Some(file) = &authorization.credentials_file {
        w.string_attr("credentials_file", file);
    }
    w.end_block();
}

fn write_oauth2(w: &mut BlockWriter, oauth2: &OAuth2Config) {
    w.begin_block("oauth2", None);
    w.string_attr("client_id", &oauth2.client_id);
    if let Some(secret) = &oauth2.client_secret {
        w.secret_attr("client_secret", secret);
    }
    if let Some(file) = &oauth2.client_secret_file {
        w.string_attr("client_secret_file", file);
    }
    if !oauth2.scopes.is_empty() {
        let scopes: Vec<_> = oauth2.scopes.iter().map(|scope| quote(scope)).collect();
        w.raw_attr("scopes", &format!("[{}]", scopes.join(", ")));
    }
    w.string_attr("token_url", &oauth2.token_url);
    if !oauth2.endpoint_params.is_empty() {
        w.raw_attr(
            "endpoint_params",
            &object_expr(&oauth2.endpoint_params, w.indent, |value| quote(value)),
        );
    }
    if let Some(proxy_url) = &oauth2.proxy_url {
        w.string_attr("proxy_url", proxy_url.as_str());
    }
    write_tls_config(w, &oauth2.tls_config);
    w.end_block();
}

fn write_tls_config(w: &mut BlockWriter, tls_config: &TlsConfig) {
    if *tls_config == TlsConfig::default() {
        return;
    }

    w.begin_block("tls_config", None);
    let strings = [
        ("ca_pem", &tls_config.ca_pem),
        ("ca_file", &tls_config.ca_file),
        ("cert_pem", &tls_config.cert_pem),
        ("cert_file", &tls_config.cert_file),
    ];
    for (name, value) in strings {
        if let Some(value) = value {
            w.string_attr(name, value);
        }
    }
    if let Some(key) = &tls_config.key_pem {
        w.secret_attr("key_pem", key);
    }
    if let Some(file) = &tls_config.key_file {
        w.string_attr("key_file", file);
    }
    if let Some(server_name) = &tls_config.server_name {
        w.string_attr("server_name", server_name);
    }
    if tls_config.insecure_skip_verify {
        w.bool_attr("insecure_skip_verify", true);
    }
    if let Some(min_version) = &tls_config.min_version {
        w.string_attr("min_version", min_version);
    }
    w.end_block();
}

fn targets_expr(targets: &[BTreeMap<String, String>], indent: usize) -> String {
    if targets.is_empty() {
        return "[]".to_string();
    }

    let objects: Vec<_> = targets
        .iter()
        .map(|target| object_expr(target, indent, |value| quote(value)))
        .collect();
    format!("[{}]", objects.join(", "))
}

fn params_expr(params: &BTreeMap<String, Vec<String>>, indent: usize) -> String {
    object_expr(params, indent, |values| {
        let values: Vec<_> = values.iter().map(|value| quote(value)).collect();
        format!("[{}]", values.join(", "))
    })
}

/// An object literal whose fields are indented one level deeper than the
/// attribute holding it.
fn object_expr<V>(
    fields: &BTreeMap<String, V>,
    indent: usize,
    value_expr: impl Fn(&V) -> String,
) -> String {
    if fields.is_empty() {
        return "{}".to_string();
    }

    let mut out = String::from("{\n");
    for (key, value) in fields {
        let _ = writeln!(
            out,
            "{}{} = {},",
            "\t".repeat(indent + 1),
            object_key(key),
            value_expr(value)
        );
    }
    out.push_str(&"\t".repeat(indent));
    out.push('}');
    out
}

fn object_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn is_identifier(input: &str) -> bool {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Quotes and escapes a string literal.
pub fn quote(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('"');
    for c in input.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Formats a duration the way Go's duration parser reads it back, e.g.
/// `1h30m` or `1s500ms`. No precision is lost.
pub fn format_duration(duration: Duration) -> String {
    if duration.is_zero() {
        return "0s".to_string();
    }

    let total_secs = duration.as_secs();
    let nanos = duration.subsec_nanos();

    let components = [
        (total_secs / 3600, "h"),
        ((total_secs % 3600) / 60, "m"),
        (total_secs % 60, "s"),
        (u64::from(nanos / 1_000_000), "ms"),
        (u64::from((nanos / 1_000) % 1_000), "us"),
        (u64::from(nanos % 1_000), "ns"),
    ];

    components
        .iter()
        .filter(|(value, _)| *value != 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect()
}

#[derive(Default)]
struct BlockWriter {
    out: String,
    indent: usize,
}

impl BlockWriter {
    fn begin_block(&mut self, name: &str, label: Option<&str>) {
        self.pad();
        match label {
            Some(label) => {
                let _ = writeln!(self.out, "{name} {} {{", quote(label));
            }
            None => {
                let _ = writeln!(self.out, "{name} {{");
            }
        }
        self.indent += 1;
    }

    fn end_block(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.pad();
        self.out.push_str("}\n");
    }

    fn raw_attr(&mut self, name: &str, expr: &str) {
        self.pad();
        let _ = writeln!(self.out, "{name} = {expr}");
    }

    fn string_attr(&mut self, name: &str, value: &str) {
        self.raw_attr(name, &quote(value));
    }

    fn secret_attr(&mut self, name: &str, value: &Secret) {
        self.string_attr(name, value.expose());
    }

    fn bool_attr(&mut self, name: &str, value: bool) {
        self.raw_attr(name, if value { "true" } else { "false" });
    }

    fn blank_line(&mut self) {
        self.out.push('\n');
    }

    fn pad(&mut self) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::discovery::Target;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn component(arguments: scrape::Arguments) -> Component {
        Component {
            name: scrape::COMPONENT_NAME.to_string(),
            label: "prometheus".to_string(),
            arguments,
        }
    }

    #[test]
    fn minimal_component() {
        let output = render(&[component(scrape::Arguments {
            job_name: "prometheus".to_string(),
            ..Default::default()
        })]);

        assert_eq!(
            output,
            "prometheus.scrape \"prometheus\" {\n\
             \ttargets = []\n\
             \tforward_to = []\n\
             \tjob_name = \"prometheus\"\n\
             }\n"
        );
    }

    #[test]
    fn non_default_attributes() {
        let mut http_client_config = HttpClientConfig {
            bearer_token: Some(Secret::new("token")),
            follow_redirects: false,
            ..Default::default()
        };
        http_client_config.tls_config.insecure_skip_verify = true;

        let output = render(&[component(scrape::Arguments {
            targets: vec![
                Target::from([("__address__".to_string(), "localhost:9090".to_string())]),
                Target::from([("env".to_string(), "prod".to_string())]),
            ],
            forward_to: vec!["prometheus.remote_write.default.receiver".to_string()],
            job_name: "prometheus".to_string(),
            params: BTreeMap::from([("module".to_string(), vec!["http_2xx".to_string()])]),
            scrape_interval: Duration::from_secs(15),
            sample_limit: 1000,
            http_client_config,
            ..Default::default()
        })]);

        assert_eq!(
            output,
            r#"prometheus.scrape "prometheus" {
	targets = [{
		__address__ = "localhost:9090",
	}, {
		env = "prod",
	}]
	forward_to = [prometheus.remote_write.default.receiver]
	job_name = "prometheus"
	params = {
		module = ["http_2xx"],
	}
	scrape_interval = "15s"
	sample_limit = 1000
	bearer_token = "token"
	follow_redirects = false
	tls_config {
		insecure_skip_verify = true
	}
}
"#
        );
    }

    #[test]
    fn components_are_separated_by_blank_lines() {
        let first = component(scrape::Arguments::default());
        let second = Component {
            label: "node".to_string(),
            ..first.clone()
        };

        let output = render(&[first, second]);

        assert!(output.contains("}\n\nprometheus.scrape \"node\" {\n"));
    }

    #[rstest]
    #[case(Duration::ZERO, "0s")]
    #[case(Duration::from_secs(15), "15s")]
    #[case(Duration::from_secs(90), "1m30s")]
    #[case(Duration::from_millis(1500), "1s500ms")]
    #[case(Duration::from_secs(36 * 3600), "36h")]
    #[case(Duration::new(1, 1), "1s1ns")]
    fn durations(#[case] duration: Duration, #[case] expected: &str) {
        assert_eq!(format_duration(duration), expected);
    }

    #[rstest]
    #[case("plain", r#""plain""#)]
    #[case("say \"hi\"", r#""say \"hi\"""#)]
    #[case("C:\\path", r#""C:\\path""#)]
    #[case("line\nbreak", r#""line\nbreak""#)]
    fn quoting(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(quote(input), expected);
    }

    #[test]
    fn object_keys_are_quoted_when_needed() {
        let target = Target::from([("not-an-ident".to_string(), "x".to_string())]);

        assert_eq!(
            targets_expr(&[target], 1),
            "[{\n\t\t\"not-an-ident\" = \"x\",\n\t}]"
        );
    }
}
