//! GDB target description document (`target.xml`).

/// Architecture name reported to the debugger.
pub const ARCHITECTURE: &str = "riscv";

/// Feature name for the core register set.
pub const FEATURE_NAME: &str = "org.gnu.gdb.riscv.cpu";

/// Target description sent in reply to `qXfer:features:read:target.xml`.
///
/// Register order must match [`REGISTERS`](crate::REGISTERS); the `g` dump
/// is parsed positionally against it.
const TARGET_XML: &str = r#"

<target>
  <architecture>riscv</architecture>


<feature name="org.gnu.gdb.riscv.cpu">
  <reg name="zero" bitsize="32" type="int" regnum="0"/>
  <reg name="ra" bitsize="32" type="code_ptr"/>
  <reg name="sp" bitsize="32" type="data_ptr"/>
  <reg name="gp" bitsize="32" type="data_ptr"/>
  <reg name="tp" bitsize="32" type="data_ptr"/>
  <reg name="t0" bitsize="32" type="int"/>
  <reg name="t1" bitsize="32" type="int"/>
  <reg name="t2" bitsize="32" type="int"/>
  <reg name="fp" bitsize="32" type="data_ptr"/>
  <reg name="s1" bitsize="32" type="int"/>
  <reg name="a0" bitsize="32" type="int"/>
  <reg name="a1" bitsize="32" type="int"/>
  <reg name="a2" bitsize="32" type="int"/>
  <reg name="a3" bitsize="32" type="int"/>
  <reg name="a4" bitsize="32" type="int"/>
  <reg name="a5" bitsize="32" type="int"/>
  <reg name="a6" bitsize="32" type="int"/>
  <reg name="a7" bitsize="32" type="int"/>
  <reg name="s2" bitsize="32" type="int"/>
  <reg name="s3" bitsize="32" type="int"/>
  <reg name="s4" bitsize="32" type="int"/>
  <reg name="s5" bitsize="32" type="int"/>
  <reg name="s6" bitsize="32" type="int"/>
  <reg name="s7" bitsize="32" type="int"/>
  <reg name="s8" bitsize="32" type="int"/>
  <reg name="s9" bitsize="32" type="int"/>
  <reg name="s10" bitsize="32" type="int"/>
  <reg name="s11" bitsize="32" type="int"/>
  <reg name="t3" bitsize="32" type="int"/>
  <reg name="t4" bitsize="32" type="int"/>
  <reg name="t5" bitsize="32" type="int"/>
  <reg name="t6" bitsize="32" type="int"/>
  <reg name="pc" bitsize="32" type="code_ptr"/>
</feature>
</target>
"#;

/// The target description document.
#[must_use]
pub const fn target_xml() -> &'static str {
    TARGET_XML
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NUM_REGS, REGISTERS};

    fn reg_names(xml: &str) -> Vec<&str> {
        xml.match_indices("<reg name=\"")
            .map(|(i, m)| {
                let rest = &xml[i + m.len()..];
                &rest[..rest.find('"').unwrap()]
            })
            .collect()
    }

    #[test]
    fn test_declares_riscv() {
        let xml = target_xml();
        assert!(xml.contains(&format!("<architecture>{ARCHITECTURE}</architecture>")));
        assert!(xml.contains(&format!("<feature name=\"{FEATURE_NAME}\">")));
        assert!(xml.ends_with("</feature>\n</target>\n"));
    }

    #[test]
    fn test_register_order_matches_table() {
        let names = reg_names(target_xml());
        assert_eq!(names.len(), NUM_REGS);
        let expected: Vec<_> = REGISTERS.iter().map(|r| r.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_exact_bytes() {
        let header = "\n\n<target>\n  <architecture>riscv</architecture>\n\n\n\
                      <feature name=\"org.gnu.gdb.riscv.cpu\">\n";
        let mut expected = header.to_string();
        for (regnum, reg) in REGISTERS.iter().enumerate() {
            let num = if regnum == 0 { " regnum=\"0\"" } else { "" };
            expected.push_str(&format!(
                "  <reg name=\"{}\" bitsize=\"32\" type=\"{}\"{num}/>\n",
                reg.name,
                reg.ty.as_str()
            ));
        }
        expected.push_str("</feature>\n</target>\n");

        assert_eq!(target_xml(), expected);
        assert_eq!(target_xml().len(), 1574);
    }

    #[test]
    fn test_reply_checksum() {
        let sum = target_xml()
            .bytes()
            .fold(0u8, |acc, b| acc.wrapping_add(b));
        assert_eq!(sum, 0x98);
    }
}
