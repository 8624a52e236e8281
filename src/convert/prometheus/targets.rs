use crate::component::discovery::Target;
use crate::prometheus::DiscoveryConfig;

/// Flattens the targets of all static discovery entries.
///
/// Every label of every target becomes a target of its own, in entry, group,
/// target and label order. Other discovery mechanisms contribute nothing.
pub fn get_targets(service_discovery_configs: &[DiscoveryConfig]) -> Vec<Target> {
    let mut targets = Vec::new();

    for service_discovery_config in service_discovery_configs {
        match service_discovery_config {
            DiscoveryConfig::Static(groups) => {
                for group in groups {
                    for label_set in &group.targets {
                        for (label_name, label_value) in label_set {
                            targets.push(Target::from([(
                                label_name.clone(),
                                label_value.clone(),
                            )]));
                        }
                    }
                }
            }
            // Mechanisms other than static discovery are not converted.
            _ => {}
        }
    }

    targets
}
