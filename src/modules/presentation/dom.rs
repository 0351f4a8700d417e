//! Lookup helpers over a markup tree. Every search includes the root.

use super::markup::{Element, Node};

pub fn find_by_id<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.get_attr("id") == Some(id) {
        return Some(root);
    }
    root.child_elements().find_map(|child| find_by_id(child, id))
}

pub fn find_by_id_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.get_attr("id") == Some(id) {
        return Some(root);
    }
    for child in root.child_nodes_mut().iter_mut() {
        if let Node::Element(el) = child {
            if let Some(found) = find_by_id_mut(el, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn find_all_by_class<'a>(root: &'a Element, class: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    walk(root, &mut |el| {
        if el.has_class(class) {
            found.push(el);
        }
    });
    found
}

pub fn find_first_by_class<'a>(root: &'a Element, class: &str) -> Option<&'a Element> {
    if root.has_class(class) {
        return Some(root);
    }
    root.child_elements()
        .find_map(|child| find_first_by_class(child, class))
}

pub fn find_first_by_class_mut<'a>(root: &'a mut Element, class: &str) -> Option<&'a mut Element> {
    if root.has_class(class) {
        return Some(root);
    }
    for child in root.child_nodes_mut().iter_mut() {
        if let Node::Element(el) = child {
            if let Some(found) = find_first_by_class_mut(el, class) {
                return Some(found);
            }
        }
    }
    None
}

/// Calls `f` on every element carrying `class`, in document order.
pub fn for_each_by_class_mut(root: &mut Element, class: &str, f: &mut impl FnMut(&mut Element)) {
    if root.has_class(class) {
        f(root);
    }
    for child in root.child_nodes_mut().iter_mut() {
        if let Node::Element(el) = child {
            for_each_by_class_mut(el, class, f);
        }
    }
}

pub fn find_all_by_attr<'a>(root: &'a Element, name: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    walk(root, &mut |el| {
        if el.get_attr(name).is_some() {
            found.push(el);
        }
    });
    found
}

fn walk<'a>(root: &'a Element, visit: &mut impl FnMut(&'a Element)) {
    visit(root);
    for child in root.child_elements() {
        walk(child, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::markup::el;

    fn sample() -> Element {
        el("div").id("root").children([
            el("div").class("ani a").id("first"),
            el("section").child(
                el("div")
                    .class("ani")
                    .attr("data-action", "open-envelope")
                    .child(el("span").id("deep").class("skill-fill")),
            ),
        ])
    }

    #[test]
    fn finds_by_id_at_any_depth() {
        let tree = sample();

        assert_eq!(find_by_id(&tree, "root").map(|e| e.tag()), Some("div"));
        assert_eq!(find_by_id(&tree, "deep").map(|e| e.tag()), Some("span"));
        assert!(find_by_id(&tree, "missing").is_none());
    }

    #[test]
    fn finds_classes_in_document_order() {
        let tree = sample();

        let found = find_all_by_class(&tree, "ani");

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].get_attr("id"), Some("first"));
        assert!(find_first_by_class(&tree, "skill-fill").is_some());
    }

    #[test]
    fn mutates_every_match() {
        let mut tree = sample();

        for_each_by_class_mut(&mut tree, "ani", &mut |e| e.set_style_prop("visibility", "hidden"));

        for found in find_all_by_class(&tree, "ani") {
            assert_eq!(found.style_prop("visibility").as_deref(), Some("hidden"));
        }
        find_by_id_mut(&mut tree, "deep").unwrap().set_text("x");
        assert_eq!(find_by_id(&tree, "deep").unwrap().text_content(), "x");
    }

    #[test]
    fn finds_by_attribute() {
        let tree = sample();

        let actions = find_all_by_attr(&tree, "data-action");

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].get_attr("data-action"), Some("open-envelope"));
    }
}
