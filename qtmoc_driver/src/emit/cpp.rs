//! `moc.cpp` and `moc.h`.

use std::fmt::Write;

use qtmoc_common::{MOC_H, MOC_OUTPUT};
use qtmoc_model::{ClassRecord, MemberCategory, Registry};

use super::{Binding, EmitError, bindings, referenced_library_classes, upper_first};

pub(crate) const GENERATED: &str = "Code generated by qtmoc. DO NOT EDIT.";

const FIXED_INCLUDES: &[&str] = &[
    "QByteArray",
    "QMetaObject",
    "QObject",
    "QString",
    "QStringList",
    "cstdlib",
    "cstring",
];

/// Text crosses the boundary as UTF-8 in `malloc` memory, lists as
/// `<byte length>:<bytes>` per element.
const HELPERS: &str = r#"static char* moc_strdup(const QByteArray& data)
{
	char* out = static_cast<char*>(malloc(data.size() + 1));
	memcpy(out, data.constData(), data.size() + 1);
	return out;
}

static QString moc_take_string(char* raw)
{
	QString out = QString::fromUtf8(raw);
	free(raw);
	return out;
}

static QByteArray moc_join_list(const QStringList& list)
{
	QByteArray out;
	for (const QString& item : list) {
		QByteArray utf8 = item.toUtf8();
		out.append(QByteArray::number(utf8.size()));
		out.append(':');
		out.append(utf8);
	}
	return out;
}

static QStringList moc_split_list(const char* raw)
{
	QStringList list;
	QByteArray data(raw);
	int pos = 0;
	while (pos < data.size()) {
		int colon = data.indexOf(':', pos);
		if (colon < 0) {
			break;
		}
		bool ok = false;
		int len = data.mid(pos, colon - pos).toInt(&ok);
		if (!ok || len < 0 || colon + 1 + len > data.size()) {
			break;
		}
		list.append(QString::fromUtf8(data.mid(colon + 1, len)));
		pos = colon + 1 + len;
	}
	return list;
}

static QStringList moc_take_list(char* raw)
{
	QStringList out = moc_split_list(raw);
	free(raw);
	return out;
}
"#;

pub(crate) fn render_source(registry: &Registry, classes: &[&ClassRecord]) -> Result<String, EmitError> {
    let mut out = String::new();
    writeln!(out, "// {GENERATED}")?;
    writeln!(out)?;
    writeln!(out, "#include \"{MOC_H}\"")?;
    writeln!(out, "#include \"_cgo_export.h\"")?;
    writeln!(out)?;

    let mut includes: Vec<String> = FIXED_INCLUDES.iter().map(|s| s.to_string()).collect();
    includes.extend(referenced_library_classes(registry, classes));
    includes.sort();
    includes.dedup();
    for include in &includes {
        writeln!(out, "#include <{include}>")?;
    }
    writeln!(out)?;
    out.push_str(HELPERS);

    // Parameters may name classes declared further down.
    writeln!(out)?;
    for class in classes {
        writeln!(out, "class {};", class.name)?;
    }

    for class in classes {
        let bound = bindings(registry, class);
        writeln!(out)?;
        render_class(&mut out, class, &bound)?;
        render_wrappers(&mut out, class, &bound)?;
    }

    writeln!(out)?;
    writeln!(out, "#include \"{MOC_OUTPUT}\"")?;
    Ok(out)
}

fn render_class(out: &mut String, class: &ClassRecord, bound: &[Binding<'_>]) -> Result<(), EmitError> {
    let name = &class.name;
    let base = class.base.as_deref().unwrap_or_default();

    writeln!(out, "class {name}: public {base}")?;
    writeln!(out, "{{")?;
    writeln!(out, "Q_OBJECT")?;
    writeln!(out, "public:")?;

    for b in bound {
        match b.member.category {
            MemberCategory::Constructor => {
                let args = b.params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
                writeln!(
                    out,
                    "\t{name}({}) : {base}({}) {{}};",
                    b.cpp_params(),
                    args.join(", ")
                )?;
            }
            MemberCategory::Destructor => {
                writeln!(out, "\t~{name}() {{ {}(this); }};", b.callback(name))?;
            }
            MemberCategory::Signal => {
                writeln!(
                    out,
                    "\tvoid Signal_{}({}) {{ {}({}); }};",
                    b.suffix,
                    b.cpp_params(),
                    b.callback(name),
                    callback_args(b)
                )?;
            }
            MemberCategory::Slot => {}
        }
    }

    let signals: Vec<_> = bound
        .iter()
        .filter(|b| b.member.category == MemberCategory::Signal)
        .collect();
    if !signals.is_empty() {
        writeln!(out, "signals:")?;
        for b in signals {
            writeln!(out, "\tvoid {}({});", b.member.name, b.cpp_params())?;
        }
    }

    let slots: Vec<_> = bound
        .iter()
        .filter(|b| b.member.category == MemberCategory::Slot)
        .collect();
    if !slots.is_empty() {
        writeln!(out, "public slots:")?;
        for b in slots {
            let call = format!("{}({})", b.callback(name), callback_args(b));
            let body = if b.returns_value() {
                format!("return {};", b.result.cpp_from_c(&call, true))
            } else {
                format!("{call};")
            };
            writeln!(
                out,
                "\t{} {}({}) {{ {body} }};",
                b.cpp_result(),
                b.member.name,
                b.cpp_params()
            )?;
        }
    }

    writeln!(out, "}};")?;
    Ok(())
}

fn render_wrappers(out: &mut String, class: &ClassRecord, bound: &[Binding<'_>]) -> Result<(), EmitError> {
    let name = &class.name;
    let this = format!("static_cast<{name}*>(ptr)");

    for b in bound {
        let wrapper = b.wrapper(name);
        let args = native_args(b);
        match b.member.category {
            MemberCategory::Constructor => {
                writeln!(out)?;
                writeln!(out, "void* {wrapper}({})", b.c_params())?;
                writeln!(out, "{{")?;
                writeln!(out, "\treturn new {name}({args});")?;
                writeln!(out, "}}")?;
            }
            MemberCategory::Destructor => {
                writeln!(out)?;
                writeln!(out, "void {wrapper}({})", b.c_params())?;
                writeln!(out, "{{")?;
                writeln!(out, "\tdelete {this};")?;
                writeln!(out, "}}")?;
            }
            MemberCategory::Signal => {
                for verb in ["connect", "disconnect"] {
                    writeln!(out)?;
                    writeln!(out, "void {name}_{}{}(void* ptr)", upper_first(verb), b.suffix)?;
                    writeln!(out, "{{")?;
                    writeln!(
                        out,
                        "\tQObject::{verb}({this}, &{name}::{}, {this}, &{name}::Signal_{});",
                        b.member.name, b.suffix
                    )?;
                    writeln!(out, "}}")?;
                }
                writeln!(out)?;
                writeln!(out, "void {wrapper}({})", b.c_params())?;
                writeln!(out, "{{")?;
                writeln!(out, "\t{this}->{}({args});", b.member.name)?;
                writeln!(out, "}}")?;
            }
            MemberCategory::Slot => {
                let call = format!("{this}->{}({args})", b.member.name);
                writeln!(out)?;
                writeln!(out, "{} {wrapper}({})", b.c_result(), b.c_params())?;
                writeln!(out, "{{")?;
                if b.returns_value() {
                    writeln!(out, "\treturn {};", b.result.cpp_to_c(&call, true))?;
                } else {
                    writeln!(out, "\t{call};")?;
                }
                writeln!(out, "}}")?;
            }
        }
    }
    Ok(())
}

pub(crate) fn render_header(registry: &Registry, classes: &[&ClassRecord]) -> Result<String, EmitError> {
    let mut out = String::new();
    writeln!(out, "// {GENERATED}")?;
    writeln!(out)?;
    writeln!(out, "#pragma once")?;
    writeln!(out)?;
    writeln!(out, "#ifndef GO_QTMOC_H")?;
    writeln!(out, "#define GO_QTMOC_H")?;
    writeln!(out)?;
    writeln!(out, "#ifdef __cplusplus")?;
    writeln!(out, "extern \"C\" {{")?;
    writeln!(out, "#endif")?;

    for class in classes {
        let name = &class.name;
        writeln!(out)?;
        for b in bindings(registry, class) {
            let wrapper = b.wrapper(name);
            match b.member.category {
                MemberCategory::Constructor => {
                    writeln!(out, "void* {wrapper}({});", b.c_params())?;
                }
                MemberCategory::Destructor => {
                    writeln!(out, "void {wrapper}({});", b.c_params())?;
                }
                MemberCategory::Signal => {
                    writeln!(out, "void {name}_Connect{}(void* ptr);", b.suffix)?;
                    writeln!(out, "void {name}_Disconnect{}(void* ptr);", b.suffix)?;
                    writeln!(out, "void {wrapper}({});", b.c_params())?;
                }
                MemberCategory::Slot => {
                    writeln!(out, "{} {wrapper}({});", b.c_result(), b.c_params())?;
                }
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "#ifdef __cplusplus")?;
    writeln!(out, "}}")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;
    writeln!(out, "#endif")?;
    Ok(out)
}

/// `this` then every parameter converted for a Go callback.
fn callback_args(b: &Binding<'_>) -> String {
    let mut args = vec!["this".to_string()];
    args.extend(b.params.iter().map(|p| p.boundary.cpp_to_c(&p.name, false)));
    args.join(", ")
}

/// Every C parameter converted back to its Qt type.
fn native_args(b: &Binding<'_>) -> String {
    b.params
        .iter()
        .map(|p| p.boundary.cpp_from_c(&p.name, false))
        .collect::<Vec<_>>()
        .join(", ")
}
