//! Parses a `pom.xml` into a [`BuildDescriptor`].

use super::{
    Activation, Build, BuildDescriptor, ConfigNode, Dependency, Execution, Parent, Plugin, Profile,
};
use crate::error::{GenerationError, Result};
use roxmltree::{Document, Node};
use std::collections::BTreeMap;

const PROJECT_FIELDS: &[&str] = &[
    "modelVersion",
    "parent",
    "groupId",
    "artifactId",
    "version",
    "packaging",
    "properties",
    "dependencyManagement",
    "dependencies",
    "build",
    "profiles",
];
const BUILD_FIELDS: &[&str] = &["finalName", "plugins"];
const PLUGIN_FIELDS: &[&str] = &["groupId", "artifactId", "version", "executions", "configuration"];

/// Parse `content` into a descriptor.
///
/// Elements without a typed field are kept as [`ConfigNode`] trees in the
/// `extra` lists of the project, its builds and plugins.
pub fn parse_pom(content: &str) -> Result<BuildDescriptor> {
    let doc = Document::parse(content).map_err(|e| GenerationError::Descriptor(e.to_string()))?;
    let root = doc.root_element();
    if !root.has_tag_name("project") {
        return Err(GenerationError::Descriptor(format!(
            "root element is <{}>, expected <project>",
            root.tag_name().name()
        )));
    }

    let artifact_id = child_text(root, "artifactId")
        .ok_or_else(|| GenerationError::Descriptor("No artifactId found in pom.xml".to_string()))?;

    Ok(BuildDescriptor {
        parent: child(root, "parent").map(parse_parent),
        group_id: child_text(root, "groupId").unwrap_or_default(),
        artifact_id,
        version: child_text(root, "version").unwrap_or_default(),
        packaging: child_text(root, "packaging"),
        properties: child(root, "properties").map(parse_properties).unwrap_or_default(),
        dependency_management: child(root, "dependencyManagement")
            .and_then(|m| child(m, "dependencies"))
            .map(parse_dependencies)
            .unwrap_or_default(),
        dependencies: child(root, "dependencies")
            .map(parse_dependencies)
            .unwrap_or_default(),
        build: child(root, "build").map(parse_build).unwrap_or_default(),
        profiles: child(root, "profiles")
            .map(|p| elements(p, "profile").map(parse_profile).collect())
            .unwrap_or_default(),
        extra: unknown_children(root, PROJECT_FIELDS),
    })
}

fn parse_parent(node: Node) -> Parent {
    Parent {
        group_id: child_text(node, "groupId").unwrap_or_default(),
        artifact_id: child_text(node, "artifactId").unwrap_or_default(),
        version: child_text(node, "version").unwrap_or_default(),
        relative_path: child_text(node, "relativePath"),
    }
}

fn unknown_children(node: Node, known: &[&str]) -> Vec<ConfigNode> {
    node.children()
        .filter(|c| c.is_element() && !known.contains(&c.tag_name().name()))
        .map(parse_config_node)
        .collect()
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.is_element() && c.has_tag_name(name))
}

fn elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |c| c.is_element() && c.has_tag_name(name))
}

fn child_text(node: Node, name: &str) -> Option<String> {
    child(node, name)
        .and_then(|c| c.text())
        .map(|t| t.trim().to_string())
}

fn parse_properties(node: Node) -> BTreeMap<String, String> {
    node.children()
        .filter(|c| c.is_element())
        .map(|c| {
            (
                c.tag_name().name().to_string(),
                c.text().map(|t| t.trim().to_string()).unwrap_or_default(),
            )
        })
        .collect()
}

fn parse_dependencies(node: Node) -> Vec<Dependency> {
    elements(node, "dependency")
        .map(|d| Dependency {
            group_id: child_text(d, "groupId").unwrap_or_default(),
            artifact_id: child_text(d, "artifactId").unwrap_or_default(),
            version: child_text(d, "version"),
            dependency_type: child_text(d, "type"),
            scope: child_text(d, "scope"),
        })
        .collect()
}

fn parse_build(node: Node) -> Build {
    Build {
        final_name: child_text(node, "finalName"),
        plugins: child(node, "plugins")
            .map(|p| elements(p, "plugin").map(parse_plugin).collect())
            .unwrap_or_default(),
        extra: unknown_children(node, BUILD_FIELDS),
    }
}

fn parse_plugin(node: Node) -> Plugin {
    Plugin {
        group_id: child_text(node, "groupId").unwrap_or_else(|| "org.apache.maven.plugins".to_string()),
        artifact_id: child_text(node, "artifactId").unwrap_or_default(),
        version: child_text(node, "version"),
        executions: child(node, "executions")
            .map(|e| elements(e, "execution").map(parse_execution).collect())
            .unwrap_or_default(),
        configuration: child(node, "configuration").map(parse_config_node),
        extra: unknown_children(node, PLUGIN_FIELDS),
    }
}

fn parse_execution(node: Node) -> Execution {
    Execution {
        id: child_text(node, "id"),
        phase: child_text(node, "phase"),
        goals: child(node, "goals")
            .map(|g| {
                elements(g, "goal")
                    .filter_map(|goal| goal.text().map(|t| t.trim().to_string()))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn parse_config_node(node: Node) -> ConfigNode {
    let mut config = ConfigNode::new(node.tag_name().name());
    let mut has_children = false;
    for c in node.children().filter(|c| c.is_element()) {
        has_children = true;
        config.add_child(parse_config_node(c));
    }
    if !has_children {
        if let Some(text) = node.text().map(str::trim).filter(|t| !t.is_empty()) {
            config.set_value(text);
        }
    }
    config
}

fn parse_profile(node: Node) -> Profile {
    let active_by_default = child(node, "activation")
        .and_then(|a| child_text(a, "activeByDefault"))
        .map(|v| v == "true")
        .unwrap_or(false);

    Profile {
        id: child_text(node, "id").unwrap_or_default(),
        activation: Activation { active_by_default },
        properties: child(node, "properties").map(parse_properties).unwrap_or_default(),
        dependencies: child(node, "dependencies")
            .map(parse_dependencies)
            .unwrap_or_default(),
        build: child(node, "build").map(parse_build).unwrap_or_default(),
    }
}
