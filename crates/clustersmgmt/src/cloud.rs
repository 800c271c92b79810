//! Cloud providers, regions, machine types and cloud credentials.

use ocm_core::{ocm_class, ocm_struct};

use crate::enums::MachineTypeCategory;

ocm_class! {
    /// Cloud provider where clusters can be installed.
    pub struct CloudProvider: "CloudProvider" {
        /// Human friendly identifier, for example `aws` or `gcp`.
        text name: String => "name",
        text display_name: String => "display_name",
    }
}

ocm_class! {
    /// Region of a cloud provider.
    pub struct CloudRegion: "CloudRegion" {
        value cloud_provider: CloudProvider => "cloud_provider",
        text display_name: String => "display_name",
        copy enabled: bool => "enabled",
        text name: String => "name",
        copy supports_multi_az: bool => "supports_multi_az",
    }
}

ocm_class! {
    /// Machine type that can be used for the nodes of a cluster.
    pub struct MachineType: "MachineType" {
        value category: MachineTypeCategory => "category",
        value cloud_provider: CloudProvider => "cloud_provider",
        value cpu: Value => "cpu",
        value memory: Value => "memory",
        text name: String => "name",
    }
}

ocm_struct! {
    /// Numeric amount with a unit, like `16 GiB` or `4 vCPU`.
    pub struct Value {
        text unit: String => "unit",
        copy value: f64 => "value",
    }
}

ocm_struct! {
    /// Amazon Web Services account credentials.
    pub struct Aws {
        text access_key_id: String => "access_key_id",
        text account_id: String => "account_id",
        text secret_access_key: String => "secret_access_key",
    }
}

ocm_struct! {
    /// Google Cloud Platform service account credentials.
    pub struct Gcp {
        text auth_provider_x509_cert_url: String => "auth_provider_x509_cert_url",
        text auth_uri: String => "auth_uri",
        text client_email: String => "client_email",
        text client_id: String => "client_id",
        text client_x509_cert_url: String => "client_x509_cert_url",
        text private_key: String => "private_key",
        text private_key_id: String => "private_key_id",
        text project_id: String => "project_id",
        text token_uri: String => "token_uri",
        text type_: String => "type",
    }
}

ocm_struct! {
    /// Customer cloud subscription: the cluster runs in the customer's own account.
    pub struct Ccs {
        copy disable_scp_checks: bool => "disable_scp_checks",
        copy enabled: bool => "enabled",
    }
}

ocm_struct! {
    pub struct AwsVolume {
        copy iops: i32 => "iops",
        /// Size in GiB.
        copy size: i32 => "size",
    }
}

ocm_struct! {
    /// Instance types and volumes used by a flavour on AWS.
    pub struct AwsFlavour {
        text compute_instance_type: String => "compute_instance_type",
        text infra_instance_type: String => "infra_instance_type",
        value infra_volume: AwsVolume => "infra_volume",
        text master_instance_type: String => "master_instance_type",
        value master_volume: AwsVolume => "master_volume",
        value worker_volume: AwsVolume => "worker_volume",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocm_core::{marshal, unmarshal};

    #[test]
    fn region_embeds_provider_link() {
        let region = CloudRegion::builder()
            .id("us-east-1")
            .cloud_provider(CloudProvider::builder().id("aws").link(true))
            .display_name("US East, N. Virginia")
            .enabled(true)
            .build();
        let json: serde_json::Value = serde_json::from_str(&marshal(&region).unwrap()).unwrap();
        assert_eq!(json["kind"], "CloudRegion");
        assert_eq!(json["cloud_provider"]["kind"], "CloudProviderLink");
        assert_eq!(json["cloud_provider"]["id"], "aws");

        let back: CloudRegion = unmarshal(marshal(&region).unwrap()).unwrap();
        assert_eq!(back.cloud_provider().map(CloudProvider::link), Some(true));
        assert_eq!(back, region);
    }

    #[test]
    fn machine_type_values() {
        let json = r#"{
            "kind": "MachineType",
            "id": "m5.xlarge",
            "category": "general_purpose",
            "cpu": {"value": 4, "unit": "vCPU"},
            "memory": {"value": 17179869184, "unit": "B"}
        }"#;
        let machine: MachineType = unmarshal(json).unwrap();
        assert_eq!(machine.category(), Some(&MachineTypeCategory::GeneralPurpose));
        assert_eq!(machine.cpu().and_then(Value::value), Some(4.0));
        assert_eq!(machine.memory().and_then(Value::unit), Some("B"));
    }

    #[test]
    fn infinite_values_are_not_sent_as_null() {
        let cpu = Value::builder().unit("vCPU").value(f64::INFINITY).build();
        assert!(marshal(&cpu).is_err());

        let cpu = Value::builder().unit("vCPU").value(0.5).build();
        let back: Value = unmarshal(marshal(&cpu).unwrap()).unwrap();
        assert_eq!(back.value(), Some(0.5));
    }

    #[test]
    fn gcp_type_uses_json_name() {
        let gcp = Gcp::builder().type_("service_account").project_id("p1").build();
        assert_eq!(
            marshal(&gcp).unwrap(),
            r#"{"project_id":"p1","type":"service_account"}"#
        );
    }
}
