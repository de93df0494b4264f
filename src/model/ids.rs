//! Identifiers for runtimes, MicroProfile specifications and versions.

crate::define_code_enum! {
    /// Application server or runtime a project is generated for
    SupportedServer {
        Quarkus => "quarkus" : "Quarkus",
        OpenLiberty => "liberty" : "Open Liberty" | "OpenLiberty",
        Payara => "payara-micro" : "Payara Micro",
        Helidon => "helidon" : "Helidon",
        Thorntail => "thorntail-v2" : "Thorntail",
        KumuluzEE => "kumuluzEE" : "KumuluzEE",
        TomEE => "tomee" : "Apache TomEE",
        WildFly => "wildfly" : "WildFly",
    }
}

crate::define_code_enum! {
    /// Optional MicroProfile specification a user can select
    MicroprofileSpec {
        Config => "config" : "Config",
        FaultTolerance => "fault_tolerance" : "Fault Tolerance",
        JwtAuth => "jwt_auth" : "JWT Auth" | "JWT Propagation",
        Metrics => "metrics" : "Metrics",
        HealthChecks => "health_checks" : "Health",
        OpenApi => "open_api" : "Open API" | "OpenAPI",
        OpenTracing => "open_tracing" : "Open Tracing" | "OpenTracing",
        RestClient => "rest_client" : "Type-safe Rest Client" | "Rest Client",
    }
}

crate::define_code_enum! {
    /// MicroProfile release a project targets
    MicroProfileVersion {
        None => "none" : "None",
        MP12 => "MP12" : "1.2",
        MP13 => "MP13" : "1.3",
        MP14 => "MP14" : "1.4",
        MP20 => "MP20" : "2.0",
        MP21 => "MP21" : "2.1",
        MP22 => "MP22" : "2.2",
        MP30 => "MP30" : "3.0",
    }
}

impl Default for MicroProfileVersion {
    fn default() -> Self {
        Self::MP30
    }
}

impl MicroprofileSpec {
    /// Template alternative activated when this specification is selected
    pub fn alternative(&self) -> String {
        format!("mp_{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_serialization() {
        assert_eq!(
            serde_json::to_string(&SupportedServer::Quarkus).unwrap(),
            "\"quarkus\""
        );
        assert_eq!(
            serde_json::to_string(&SupportedServer::Payara).unwrap(),
            "\"payara-micro\""
        );
    }

    #[test]
    fn test_spec_deserializes_from_code_or_name() {
        let by_code: MicroprofileSpec = serde_json::from_str("\"jwt_auth\"").unwrap();
        let by_name: MicroprofileSpec = serde_json::from_str("\"JWT Auth\"").unwrap();
        let by_alias: MicroprofileSpec = serde_json::from_str("\"OpenAPI\"").unwrap();

        assert_eq!(by_code, MicroprofileSpec::JwtAuth);
        assert_eq!(by_name, MicroprofileSpec::JwtAuth);
        assert_eq!(by_alias, MicroprofileSpec::OpenApi);
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let result: Result<MicroprofileSpec, _> = serde_json::from_str("\"graphql\"");
        assert!(result.is_err());
        assert!("graphql".parse::<MicroprofileSpec>().is_err());
    }

    #[test]
    fn test_version_parse_and_display() {
        assert_eq!("MP30".parse::<MicroProfileVersion>(), Ok(MicroProfileVersion::MP30));
        assert_eq!("2.2".parse::<MicroProfileVersion>(), Ok(MicroProfileVersion::MP22));
        assert_eq!(MicroProfileVersion::MP14.to_string(), "1.4");
        assert_eq!(MicroProfileVersion::default(), MicroProfileVersion::MP30);
    }

    #[test]
    fn test_spec_alternative() {
        assert_eq!(MicroprofileSpec::Metrics.alternative(), "mp_metrics");
        assert_eq!(MicroprofileSpec::JwtAuth.alternative(), "mp_jwt_auth");
    }

    #[test]
    fn test_all_variants_cover_every_spec() {
        assert_eq!(MicroprofileSpec::all_variants().len(), 8);
        assert_eq!(SupportedServer::all_variants()[0], SupportedServer::Quarkus);
    }
}
