//! Serializes a [`BuildDescriptor`] into a Maven `pom.xml`.

use super::{Build, BuildDescriptor, ConfigNode, Dependency, Parent, Plugin, Profile, MODEL_VERSION};
use std::collections::BTreeMap;
use std::fmt::Write;

const INDENT: &str = "    ";

pub fn to_pom_xml(descriptor: &BuildDescriptor) -> String {
    let mut xml = XmlWriter::default();
    xml.raw(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.raw(
        r#"<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">"#,
    );
    xml.depth += 1;

    xml.text("modelVersion", MODEL_VERSION);
    if let Some(parent) = &descriptor.parent {
        write_parent(&mut xml, parent);
    }
    if !descriptor.group_id.is_empty() {
        xml.text("groupId", &descriptor.group_id);
    }
    xml.text("artifactId", &descriptor.artifact_id);
    if !descriptor.version.is_empty() {
        xml.text("version", &descriptor.version);
    }
    if let Some(packaging) = &descriptor.packaging {
        xml.text("packaging", packaging);
    }

    write_properties(&mut xml, &descriptor.properties);
    if !descriptor.dependency_management.is_empty() {
        xml.open("dependencyManagement");
        write_dependencies(&mut xml, &descriptor.dependency_management);
        xml.close("dependencyManagement");
    }
    write_dependencies(&mut xml, &descriptor.dependencies);
    write_build(&mut xml, &descriptor.build);

    if !descriptor.profiles.is_empty() {
        xml.open("profiles");
        for profile in &descriptor.profiles {
            write_profile(&mut xml, profile);
        }
        xml.close("profiles");
    }
    for node in &descriptor.extra {
        write_config_node(&mut xml, node);
    }

    xml.depth -= 1;
    xml.raw("</project>");
    xml.finish()
}

fn write_parent(xml: &mut XmlWriter, parent: &Parent) {
    xml.open("parent");
    xml.text("groupId", &parent.group_id);
    xml.text("artifactId", &parent.artifact_id);
    xml.text("version", &parent.version);
    if let Some(relative_path) = &parent.relative_path {
        xml.text("relativePath", relative_path);
    }
    xml.close("parent");
}

fn write_properties(xml: &mut XmlWriter, properties: &BTreeMap<String, String>) {
    if properties.is_empty() {
        return;
    }
    xml.open("properties");
    for (name, value) in properties {
        xml.text(name, value);
    }
    xml.close("properties");
}

fn write_dependencies(xml: &mut XmlWriter, dependencies: &[Dependency]) {
    if dependencies.is_empty() {
        return;
    }
    xml.open("dependencies");
    for dependency in dependencies {
        xml.open("dependency");
        xml.text("groupId", &dependency.group_id);
        xml.text("artifactId", &dependency.artifact_id);
        if let Some(version) = &dependency.version {
            xml.text("version", version);
        }
        if let Some(dependency_type) = &dependency.dependency_type {
            xml.text("type", dependency_type);
        }
        if let Some(scope) = &dependency.scope {
            xml.text("scope", scope);
        }
        xml.close("dependency");
    }
    xml.close("dependencies");
}

fn write_build(xml: &mut XmlWriter, build: &Build) {
    if build.final_name.is_none() && build.plugins.is_empty() && build.extra.is_empty() {
        return;
    }
    xml.open("build");
    if let Some(final_name) = &build.final_name {
        xml.text("finalName", final_name);
    }
    if !build.plugins.is_empty() {
        xml.open("plugins");
        for plugin in &build.plugins {
            write_plugin(xml, plugin);
        }
        xml.close("plugins");
    }
    for node in &build.extra {
        write_config_node(xml, node);
    }
    xml.close("build");
}

fn write_plugin(xml: &mut XmlWriter, plugin: &Plugin) {
    xml.open("plugin");
    xml.text("groupId", &plugin.group_id);
    xml.text("artifactId", &plugin.artifact_id);
    if let Some(version) = &plugin.version {
        xml.text("version", version);
    }
    if !plugin.executions.is_empty() {
        xml.open("executions");
        for execution in &plugin.executions {
            xml.open("execution");
            if let Some(id) = &execution.id {
                xml.text("id", id);
            }
            if let Some(phase) = &execution.phase {
                xml.text("phase", phase);
            }
            xml.open("goals");
            for goal in &execution.goals {
                xml.text("goal", goal);
            }
            xml.close("goals");
            xml.close("execution");
        }
        xml.close("executions");
    }
    if let Some(configuration) = &plugin.configuration {
        write_config_node(xml, configuration);
    }
    for node in &plugin.extra {
        write_config_node(xml, node);
    }
    xml.close("plugin");
}

fn write_config_node(xml: &mut XmlWriter, node: &ConfigNode) {
    if node.children().is_empty() {
        match node.value() {
            Some(value) => xml.text(node.name(), value),
            None => xml.empty(node.name()),
        }
        return;
    }
    xml.open(node.name());
    for child in node.children() {
        write_config_node(xml, child);
    }
    xml.close(node.name());
}

fn write_profile(xml: &mut XmlWriter, profile: &Profile) {
    xml.open("profile");
    xml.text("id", &profile.id);
    xml.open("activation");
    xml.text(
        "activeByDefault",
        if profile.activation.active_by_default {
            "true"
        } else {
            "false"
        },
    );
    xml.close("activation");
    write_properties(xml, &profile.properties);
    write_dependencies(xml, &profile.dependencies);
    write_build(xml, &profile.build);
    xml.close("profile");
}

#[derive(Default)]
struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn raw(&mut self, line: &str) {
        self.indent();
        self.out.push_str(line);
        self.out.push('\n');
    }

    fn open(&mut self, name: &str) {
        self.indent();
        let _ = writeln!(self.out, "<{}>", name);
        self.depth += 1;
    }

    fn close(&mut self, name: &str) {
        self.depth -= 1;
        self.indent();
        let _ = writeln!(self.out, "</{}>", name);
    }

    fn text(&mut self, name: &str, value: &str) {
        self.indent();
        let _ = writeln!(self.out, "<{0}>{1}</{0}>", name, escape(value));
    }

    fn empty(&mut self, name: &str) {
        self.indent();
        let _ = writeln!(self.out, "<{}/>", name);
    }

    fn finish(self) -> String {
        self.out
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
