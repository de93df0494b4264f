use crate::model::SupportedServer;

const QUARKUS: &[(&str, &str)] = &[
    (
        "application.properties",
        include_str!("../../templates/quarkus/application.properties.jinja"),
    ),
    (
        "index.html",
        include_str!("../../templates/quarkus/index.html.jinja"),
    ),
    (
        "ConfigTestController.java",
        include_str!("../../templates/quarkus/ConfigTestController.java.jinja"),
    ),
    (
        "publicKey.pem",
        include_str!("../../templates/quarkus/publicKey.pem.jinja"),
    ),
];

/// Templates compiled into the binary for a server, keyed by output file name
pub fn embedded_templates(server: SupportedServer) -> &'static [(&'static str, &'static str)] {
    match server {
        SupportedServer::Quarkus => QUARKUS,
        _ => &[],
    }
}
