use pretty_assertions::assert_eq;
use promflow::convert::prometheus::{convert, ConvertOptions};
use promflow::convert::flow;
use promflow::prometheus::Config;

const PROMETHEUS_YML: &str = r#"
global:
  scrape_interval: 15s
  evaluation_interval: 15s

rule_files:
  - alerts.yml

scrape_configs:
  - job_name: prometheus
    static_configs:
      - targets: ["localhost:9090"]

  - job_name: node
    scrape_interval: 30s
    scheme: https
    basic_auth:
      username: scraper
      password: s3cret
    tls_config:
      insecure_skip_verify: true
    static_configs:
      - targets: ["node-1:9100", "node-2:9100"]
        labels:
          env: prod
    file_sd_configs:
      - files: ["/etc/prometheus/targets/*.json"]

  - job_name: kubernetes-pods
    kubernetes_sd_configs:
      - role: pod
"#;

#[test]
fn converts_prometheus_configuration_to_flow() {
    let config = Config::from_yaml(PROMETHEUS_YML).unwrap();
    assert_eq!(config.rule_files, vec!["alerts.yml"]);

    let components = convert(&config, ConvertOptions::default());
    assert_eq!(components.len(), 3);

    let output = flow::render(&components);

    assert_eq!(
        output,
        r#"prometheus.scrape "prometheus" {
	targets = [{
		__address__ = "localhost:9090",
	}]
	forward_to = []
	job_name = "prometheus"
	scrape_interval = "15s"
}

prometheus.scrape "node" {
	targets = [{
		__address__ = "node-1:9100",
	}, {
		__address__ = "node-2:9100",
	}]
	forward_to = []
	job_name = "node"
	scrape_interval = "30s"
	scheme = "https"
	basic_auth {
		username = "scraper"
		password = "s3cret"
	}
	tls_config {
		insecure_skip_verify = true
	}
}

prometheus.scrape "kubernetes_pods" {
	targets = []
	forward_to = []
	job_name = "kubernetes-pods"
	scrape_interval = "15s"
}
"#
    );
}

#[test]
fn forced_defaults_hold_for_every_component() {
    let config = Config::from_yaml(PROMETHEUS_YML).unwrap();

    for component in convert(&config, ConvertOptions { report_unsupported: true }) {
        assert!(!component.arguments.extra_metrics);
        assert!(!component.arguments.clustering.enabled);
        assert!(component.arguments.forward_to.is_empty());
    }
}
