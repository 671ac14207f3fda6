use crate::resource_analysis::domain::{Finding, FindingMetadata, ResourceDescriptor, ResourceType};
use crate::resource_analysis::profiles::{KindProfile, MetricValues};
use chrono::{DateTime, Utc};

/// FindingAssembler - builds the persisted record from derived metadata
///
/// Pure: the caller supplies the timestamp, so the same inputs always
/// produce the same finding.
pub struct FindingAssembler;

impl FindingAssembler {
    pub fn assemble(
        profile: &dyn KindProfile,
        descriptor: &ResourceDescriptor,
        metadata: FindingMetadata,
        metrics: &MetricValues,
        timestamp: DateTime<Utc>,
    ) -> Finding {
        let details = profile.details(descriptor, &metadata);
        let recommendation = profile.recommendation(descriptor, &metadata, metrics);

        Finding::new(
            descriptor.id(),
            ResourceType::from(descriptor.kind()),
            profile.issue(),
            details,
            recommendation,
            metadata,
            timestamp,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_analysis::domain::{
        attr, AttributeValue, ResourceId, ResourceKind, Severity,
    };
    use crate::resource_analysis::profiles::profile_for;
    use chrono::TimeZone;

    #[test]
    fn test_assemble_database_finding() {
        let descriptor = ResourceDescriptor::new(
            ResourceId::new("orders-db").unwrap(),
            ResourceKind::Database,
            None,
        )
        .with_attribute(attr::INSTANCE_CLASS, AttributeValue::Text("db.t3.micro".into()))
        .with_attribute(attr::ENGINE, AttributeValue::Text("mysql".into()))
        .with_attribute(attr::STATUS, AttributeValue::Text("available".into()))
        .with_attribute(attr::MULTI_AZ, AttributeValue::Boolean(false))
        .with_attribute(attr::STORAGE_TYPE, AttributeValue::Text("gp2".into()))
        .with_attribute(attr::ALLOCATED_STORAGE_GB, AttributeValue::Integer(20));

        let now = Utc.with_ymd_and_hms(2024, 5, 8, 0, 0, 0).unwrap();
        let profile = profile_for(ResourceKind::Database);
        let metrics = MetricValues::new();
        let metadata = profile.derive(&descriptor, &metrics, now).unwrap();

        let finding = FindingAssembler::assemble(profile, &descriptor, metadata, &metrics, now);

        assert_eq!(finding.id, "orders-db");
        assert_eq!(finding.resource_id, finding.id);
        assert_eq!(finding.resource_type, ResourceType::Rds);
        assert_eq!(finding.issue, "running_instance_over_10gb");
        assert_eq!(finding.severity, Severity::Info);
        assert_eq!(finding.details, "Running RDS instance with 20GB storage");
        assert_eq!(finding.timestamp, now);
        assert_eq!(finding.metadata["engine"], "mysql");
    }
}
