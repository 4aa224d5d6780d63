//! `moc.go`, the cgo half of the bridge.

use std::fmt::Write;

use qtmoc_common::MOC_H;
use qtmoc_model::{ClassRecord, MemberCategory};

use super::cpp::GENERATED;
use super::{Binding, EmitContext, EmitError, bindings};

const RUNTIME: &str = r#"var (
	mocMu        sync.Mutex
	mocCallbacks = make(map[unsafe.Pointer]map[string]interface{})
)

func mocConnect(ptr unsafe.Pointer, name string, f interface{}) {
	mocMu.Lock()
	defer mocMu.Unlock()
	if mocCallbacks[ptr] == nil {
		mocCallbacks[ptr] = make(map[string]interface{})
	}
	mocCallbacks[ptr][name] = f
}

func mocDisconnect(ptr unsafe.Pointer, name string) {
	mocMu.Lock()
	defer mocMu.Unlock()
	delete(mocCallbacks[ptr], name)
}

func mocCallback(ptr unsafe.Pointer, name string) (interface{}, bool) {
	mocMu.Lock()
	defer mocMu.Unlock()
	f, ok := mocCallbacks[ptr][name]
	return f, ok
}

func mocForget(ptr unsafe.Pointer) {
	mocMu.Lock()
	defer mocMu.Unlock()
	delete(mocCallbacks, ptr)
}

func mocBool(b bool) C.char {
	if b {
		return 1
	}
	return 0
}
"#;

const LIST_CODEC: &str = r#"
func mocJoinList(list []string) string {
	var b strings.Builder
	for _, s := range list {
		b.WriteString(strconv.Itoa(len(s)))
		b.WriteByte(':')
		b.WriteString(s)
	}
	return b.String()
}

func mocSplitList(data string) []string {
	list := make([]string, 0)
	for len(data) > 0 {
		colon := strings.IndexByte(data, ':')
		if colon < 0 {
			break
		}
		n, err := strconv.Atoi(data[:colon])
		if err != nil || n < 0 || colon+1+n > len(data) {
			break
		}
		list = append(list, data[colon+1:colon+1+n])
		data = data[colon+1+n:]
	}
	return list
}
"#;

pub(crate) fn render_glue(ctx: &EmitContext<'_>, classes: &[&ClassRecord]) -> Result<String, EmitError> {
    let bound: Vec<(&ClassRecord, Vec<Binding<'_>>)> = classes
        .iter()
        .map(|class| (*class, bindings(ctx.registry, class)))
        .collect();
    let needs_list_codec = bound.iter().flat_map(|(_, b)| b).any(|b| {
        b.params.iter().any(|p| p.boundary.needs_list_codec())
            || (b.returns_value() && b.result.needs_list_codec())
    });

    let mut out = String::new();
    writeln!(out, "// {GENERATED}")?;
    writeln!(out)?;
    writeln!(out, "package {}", ctx.package)?;
    writeln!(out)?;
    writeln!(out, "/*")?;
    writeln!(out, "#cgo CXXFLAGS: -std=c++11 -fPIC")?;
    writeln!(out, "#cgo pkg-config: {}", ctx.pkg_config.join(" "))?;
    writeln!(out, "#include <stdlib.h>")?;
    writeln!(out, "#include \"{MOC_H}\"")?;
    writeln!(out, "*/")?;
    writeln!(out, "import \"C\"")?;
    writeln!(out, "import (")?;
    if needs_list_codec {
        writeln!(out, "\t\"strconv\"")?;
        writeln!(out, "\t\"strings\"")?;
    }
    writeln!(out, "\t\"sync\"")?;
    writeln!(out, "\t\"unsafe\"")?;
    writeln!(out, ")")?;
    writeln!(out)?;
    out.push_str(RUNTIME);
    if needs_list_codec {
        out.push_str(LIST_CODEC);
    }

    for (class, members) in &bound {
        for b in members {
            writeln!(out)?;
            match b.member.category {
                MemberCategory::Constructor => render_constructor(&mut out, class, b)?,
                MemberCategory::Destructor => render_destructor(&mut out, class, b)?,
                MemberCategory::Signal => render_signal(&mut out, class, b)?,
                MemberCategory::Slot => render_slot(&mut out, class, b)?,
            }
        }
    }
    Ok(out)
}

fn render_constructor(out: &mut String, class: &ClassRecord, b: &Binding<'_>) -> Result<(), EmitError> {
    writeln!(out, "// {} creates a {}.", b.suffix, class.name)?;
    writeln!(out, "func {}({}) unsafe.Pointer {{", b.suffix, go_params(b))?;
    render_c_strings(out, b)?;
    writeln!(out, "\treturn unsafe.Pointer(C.{}({}))", b.wrapper(&class.name), c_args(b, false))?;
    writeln!(out, "}}")?;
    Ok(())
}

fn render_destructor(out: &mut String, class: &ClassRecord, b: &Binding<'_>) -> Result<(), EmitError> {
    writeln!(out, "// {} deletes a {}.", b.suffix, class.name)?;
    writeln!(out, "func {}(ptr unsafe.Pointer) {{", b.suffix)?;
    writeln!(out, "\tC.{}(ptr)", b.wrapper(&class.name))?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    let callback = b.callback(&class.name);
    writeln!(out, "//export {callback}")?;
    writeln!(out, "func {callback}(ptr unsafe.Pointer) {{")?;
    writeln!(out, "\tmocForget(ptr)")?;
    writeln!(out, "}}")?;
    Ok(())
}

fn render_signal(out: &mut String, class: &ClassRecord, b: &Binding<'_>) -> Result<(), EmitError> {
    let name = &class.name;
    let key = &b.member.fullname;
    let wrapper = b.wrapper(name);
    let params = go_params(b);

    writeln!(out, "func {name}_Connect{}(ptr unsafe.Pointer, f func({params})) {{", b.suffix)?;
    writeln!(out, "\tmocConnect(ptr, \"{key}\", f)")?;
    writeln!(out, "\tC.{name}_Connect{}(ptr)", b.suffix)?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "func {name}_Disconnect{}(ptr unsafe.Pointer) {{", b.suffix)?;
    writeln!(out, "\tC.{name}_Disconnect{}(ptr)", b.suffix)?;
    writeln!(out, "\tmocDisconnect(ptr, \"{key}\")")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "func {wrapper}({}) {{", receiver_and(&params))?;
    render_c_strings(out, b)?;
    writeln!(out, "\tC.{wrapper}({})", c_args(b, true))?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    let callback = b.callback(name);
    writeln!(out, "//export {callback}")?;
    writeln!(out, "func {callback}({}) {{", cgo_params(b))?;
    writeln!(out, "\tif f, ok := mocCallback(ptr, \"{key}\"); ok {{")?;
    writeln!(out, "\t\tf.(func({}))({})", go_types(b), go_args(b))?;
    writeln!(out, "\t}}")?;
    writeln!(out, "}}")?;
    Ok(())
}

fn render_slot(out: &mut String, class: &ClassRecord, b: &Binding<'_>) -> Result<(), EmitError> {
    let name = &class.name;
    let key = &b.member.fullname;
    let wrapper = b.wrapper(name);
    let params = go_params(b);
    let (go_result, cgo_result) = if b.returns_value() {
        (format!(" {}", b.result.go_type()), format!(" {}", b.result.cgo_type()))
    } else {
        (String::new(), String::new())
    };

    writeln!(
        out,
        "func {name}_Connect{}(ptr unsafe.Pointer, f func({params}){go_result}) {{",
        b.suffix
    )?;
    writeln!(out, "\tmocConnect(ptr, \"{key}\", f)")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "func {name}_Disconnect{}(ptr unsafe.Pointer) {{", b.suffix)?;
    writeln!(out, "\tmocDisconnect(ptr, \"{key}\")")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "func {wrapper}({}){go_result} {{", receiver_and(&params))?;
    render_c_strings(out, b)?;
    let call = format!("C.{wrapper}({})", c_args(b, true));
    if b.returns_value() && b.result.is_c_string() {
        writeln!(out, "\tmocResult := {call}")?;
        writeln!(out, "\tdefer C.free(unsafe.Pointer(mocResult))")?;
        writeln!(out, "\treturn {}", b.result.go_from_c("mocResult"))?;
    } else if b.returns_value() {
        writeln!(out, "\treturn {}", b.result.go_from_c(&call))?;
    } else {
        writeln!(out, "\t{call}")?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    let callback = b.callback(name);
    let invoke = format!("f.(func({}){go_result})({})", go_types(b), go_args(b));
    writeln!(out, "//export {callback}")?;
    writeln!(out, "func {callback}({}){cgo_result} {{", cgo_params(b))?;
    writeln!(out, "\tif f, ok := mocCallback(ptr, \"{key}\"); ok {{")?;
    if b.returns_value() {
        writeln!(out, "\t\treturn {}", b.result.go_to_c(&invoke))?;
        writeln!(out, "\t}}")?;
        writeln!(out, "\tvar zero{cgo_result}")?;
        writeln!(out, "\treturn zero")?;
    } else {
        writeln!(out, "\t\t{invoke}")?;
        writeln!(out, "\t}}")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// Converts text arguments into C strings freed on return.
fn render_c_strings(out: &mut String, b: &Binding<'_>) -> Result<(), EmitError> {
    for p in b.params.iter().filter(|p| p.boundary.is_c_string()) {
        writeln!(out, "\t{}C := {}", p.name, p.boundary.go_to_c(&p.name))?;
        writeln!(out, "\tdefer C.free(unsafe.Pointer({}C))", p.name)?;
    }
    Ok(())
}

fn receiver_and(params: &str) -> String {
    if params.is_empty() {
        "ptr unsafe.Pointer".to_string()
    } else {
        format!("ptr unsafe.Pointer, {params}")
    }
}

fn go_params(b: &Binding<'_>) -> String {
    b.params
        .iter()
        .map(|p| format!("{} {}", p.name, p.boundary.go_type()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn go_types(b: &Binding<'_>) -> String {
    b.params
        .iter()
        .map(|p| p.boundary.go_type())
        .collect::<Vec<_>>()
        .join(", ")
}

fn cgo_params(b: &Binding<'_>) -> String {
    let mut out = vec!["ptr unsafe.Pointer".to_string()];
    out.extend(
        b.params
            .iter()
            .map(|p| format!("{} {}", p.name, p.boundary.cgo_type())),
    );
    out.join(", ")
}

/// Go values converted for a call into C.
fn c_args(b: &Binding<'_>, with_receiver: bool) -> String {
    let mut out = Vec::with_capacity(b.params.len() + 1);
    if with_receiver {
        out.push("ptr".to_string());
    }
    out.extend(b.params.iter().map(|p| {
        if p.boundary.is_c_string() {
            format!("{}C", p.name)
        } else {
            p.boundary.go_to_c(&p.name)
        }
    }));
    out.join(", ")
}

/// cgo values converted for a call into Go.
fn go_args(b: &Binding<'_>) -> String {
    b.params
        .iter()
        .map(|p| p.boundary.go_from_c(&p.name))
        .collect::<Vec<_>>()
        .join(", ")
}
