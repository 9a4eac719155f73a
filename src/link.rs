use crate::generics::strip_generics;

/// One `link=page=line` entry from a javadoc dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub link: String,
    pub page: String,
    pub source_line: String,
}

impl LinkRecord {
    pub fn new(
        link: impl Into<String>,
        page: impl Into<String>,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            link: link.into(),
            page: page.into(),
            source_line: source_line.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LinkKind {
    Package,
    Class,
    /// Nested class: the second-to-last segment names the enclosing type.
    InternalClass,
}

/// The part of a link after `#`, e.g. `bar(java.lang.String)` or `count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFragment {
    pub text: String,
    pub name: String,
    pub has_parens: bool,
    pub argument_list_raw: String,
}

impl MemberFragment {
    pub fn parse(text: &str) -> Self {
        let (name, has_parens, argument_list_raw) = match text.rsplit_once('(') {
            Some((before, _)) => {
                let args = text
                    .split_once('(')
                    .map(|(_, after)| after.split(')').next().unwrap_or_default())
                    .unwrap_or_default();
                (before, true, args)
            }
            None => (text, false, ""),
        };

        Self {
            text: text.to_string(),
            name: name.to_string(),
            has_parens,
            argument_list_raw: argument_list_raw.to_string(),
        }
    }

    pub fn is_field(&self) -> bool {
        !self.has_parens
    }

    pub fn arguments(&self) -> Vec<&str> {
        if self.argument_list_raw.is_empty() {
            return Vec::new();
        }
        self.argument_list_raw.split(',').collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLink {
    pub qualified_name: String,
    pub member: Option<MemberFragment>,
    pub simple_name: String,
    pub enclosing_name: String,
    pub kind: LinkKind,
    /// Slash-separated, without a trailing slash. Empty for links with too few segments.
    pub package_path: String,
}

impl DecodedLink {
    pub fn is_package(&self) -> bool {
        self.kind == LinkKind::Package
    }

    pub fn is_internal_class(&self) -> bool {
        self.kind == LinkKind::InternalClass
    }

    /// Name of the `.java` file expected to hold the referenced type.
    pub fn file_simple_name(&self) -> &str {
        if self.is_internal_class() {
            &self.enclosing_name
        } else {
            &self.simple_name
        }
    }

    pub fn class_entry_path(&self) -> String {
        class_entry_path(&self.package_path, self.file_simple_name())
    }

    pub fn display_member(&self) -> String {
        let fragment = self.member.as_ref().map(|m| m.text.as_str()).unwrap_or_default();
        if self.is_internal_class() {
            format!("{}.{}#{fragment}", self.enclosing_name, self.simple_name)
        } else {
            format!("{}#{fragment}", self.simple_name)
        }
    }
}

pub fn class_entry_path(package_path: &str, file_simple_name: &str) -> String {
    if package_path.is_empty() {
        format!("{file_simple_name}.java")
    } else {
        format!("{package_path}/{file_simple_name}.java")
    }
}

pub fn decompose(raw_link: &str) -> DecodedLink {
    let link = if raw_link.contains('<') {
        strip_generics(raw_link)
    } else {
        raw_link.to_string()
    };

    let (qualified_name, member) = match link.split_once('#') {
        Some((qualified, fragment)) => (
            qualified.to_string(),
            (!fragment.is_empty()).then(|| MemberFragment::parse(fragment)),
        ),
        None => (link.clone(), None),
    };

    let (head, simple_name) = split_last_segment(&qualified_name);
    let (outer_head, enclosing_name) = split_last_segment(head);

    let kind = if starts_with(simple_name, char::is_lowercase) {
        LinkKind::Package
    } else if starts_with(enclosing_name, char::is_uppercase) {
        LinkKind::InternalClass
    } else {
        LinkKind::Class
    };

    let package_path = match kind {
        LinkKind::Package => qualified_name.replace('.', "/"),
        LinkKind::InternalClass => outer_head.replace('.', "/"),
        LinkKind::Class => head.replace('.', "/"),
    };

    DecodedLink {
        simple_name: simple_name.to_string(),
        enclosing_name: enclosing_name.to_string(),
        qualified_name,
        member,
        kind,
        package_path,
    }
}

/// `a.b.C` -> (`a.b`, `C`); `C` -> (``, `C`).
fn split_last_segment(name: &str) -> (&str, &str) {
    name.rsplit_once('.').unwrap_or(("", name))
}

fn starts_with(s: &str, pred: impl Fn(char) -> bool) -> bool {
    s.chars().next().is_some_and(pred)
}
