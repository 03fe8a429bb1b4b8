use super::probe::{DirectoryTag, Probe};

/// Resonances with dedicated single-resonance cross-section curves.
const RESONANCES: [(&str, &str); 16] = [
    ("1232P33", "P33(1232)"),
    ("1535S11", "S11(1535)"),
    ("1520D13", "D13(1520)"),
    ("1650S11", "S11(1650)"),
    ("1700D13", "D13(1700)"),
    ("1675D15", "D15(1675)"),
    ("1620S31", "S31(1620)"),
    ("1700D33", "D33(1700)"),
    ("1440P11", "P11(1440)"),
    ("1720P13", "P13(1720)"),
    ("1680F15", "F15(1680)"),
    ("1910P31", "P31(1910)"),
    ("1920P33", "P33(1920)"),
    ("1905F35", "F35(1905)"),
    ("1950F37", "F37(1950)"),
    ("1710P11", "P11(1710)"),
];

const DIS_CC_NU: [(&str, &str); 4] = [
    ("ubarsea", "ū_sea"),
    ("dval", "d_val"),
    ("dsea", "d_sea"),
    ("ssea", "s_sea"),
];

const DIS_CC_NUBAR: [(&str, &str); 4] = [
    ("sbarsea", "s̄_sea"),
    ("dbarsea", "d̄_sea"),
    ("uval", "u_val"),
    ("usea", "u_sea"),
];

const DIS_NC: [(&str, &str); 8] = [
    ("sbarsea", "s̄_sea"),
    ("ubarsea", "ū_sea"),
    ("dbarsea", "d̄_sea"),
    ("dval", "d_val"),
    ("dsea", "d_sea"),
    ("uval", "u_val"),
    ("usea", "u_sea"),
    ("ssea", "s_sea"),
];

const CHARM_NU: [(&str, &str); 3] = [
    ("dval", "d_val → c"),
    ("dsea", "d_sea → c"),
    ("ssea", "s_sea → c"),
];

const CHARM_NUBAR: [(&str, &str); 2] = [("dbarsea", "d̄_sea → c̄"), ("sbarsea", "s̄_sea → c̄")];

/// One curve name in a source directory together with its page title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nucleon {
    Neutron,
    Proton,
}

impl Nucleon {
    fn code(self) -> &'static str {
        match self {
            Nucleon::Neutron => "n",
            Nucleon::Proton => "p",
        }
    }
}

struct Titler<'a> {
    probe: &'a str,
    target: &'a str,
    out: Vec<CategorySpec>,
}

impl Titler<'_> {
    fn push(&mut self, name: String, nucleon: Option<Nucleon>, what: &str) {
        let title = match nucleon {
            Some(n) => format!("{} + {} {}, {what}", self.probe, n.code(), self.target),
            None => format!("{} + {}, {what}", self.probe, self.target),
        };
        self.out.push(CategorySpec { name, title });
    }
}

/// The categories a directory may hold, in page order. Which ones apply depends
/// on the probe (neutrino vs antineutrino) and the target (free nucleon vs nucleus).
pub fn categories(tag: &DirectoryTag) -> Vec<CategorySpec> {
    let target = tag.target.title_suffix();
    let mut t = Titler {
        probe: tag.probe.label(),
        target: &target,
        out: Vec::new(),
    };

    if !tag.target.is_free_nucleon() {
        t.push("tot_cc".to_owned(), None, "TOT CC");
        t.push("tot_nc".to_owned(), None, "TOT NC");
    }
    if tag.target.has_neutrons() {
        nucleon_block(&mut t, tag.probe, Nucleon::Neutron);
    }
    if tag.target.has_protons() {
        nucleon_block(&mut t, tag.probe, Nucleon::Proton);
    }

    t.out
}

fn nucleon_block(t: &mut Titler<'_>, probe: Probe, nucleon: Nucleon) {
    let n = nucleon.code();
    let on = Some(nucleon);

    t.push(format!("tot_cc_{n}"), on, "TOT CC");
    t.push(format!("tot_nc_{n}"), on, "TOT NC");

    // charged-current quasi-elastic needs a neutron for neutrinos and a proton for antineutrinos
    let qel_cc = match nucleon {
        Nucleon::Neutron => probe.is_neutrino(),
        Nucleon::Proton => probe.is_antineutrino(),
    };
    if qel_cc {
        t.push(format!("qel_cc_{n}"), on, "QEL CC");
    }
    t.push(format!("qel_nc_{n}"), on, "NCEL");

    t.push(format!("res_cc_{n}"), on, "RES CC");
    t.push(format!("res_nc_{n}"), on, "RES NC");
    for current in ["cc", "nc"] {
        let upper = current.to_uppercase();
        for (code, name) in RESONANCES {
            t.push(
                format!("res_{current}_{n}_{code}"),
                on,
                &format!("RES {upper}, {name}"),
            );
        }
    }

    t.push(format!("dis_cc_{n}"), on, "DIS CC");
    t.push(format!("dis_nc_{n}"), on, "DIS NC");

    let dis_cc: &[(&str, &str)] = if probe.is_neutrino() {
        &DIS_CC_NU
    } else {
        &DIS_CC_NUBAR
    };
    for (code, name) in dis_cc {
        t.push(format!("dis_cc_{n}_{code}"), on, &format!("DIS CC ({name})"));
    }
    for (code, name) in DIS_NC {
        t.push(format!("dis_nc_{n}_{code}"), on, &format!("DIS NC ({name})"));
    }

    let charm: &[(&str, &str)] = if probe.is_neutrino() {
        &CHARM_NU
    } else {
        &CHARM_NUBAR
    };
    for (code, name) in charm {
        t.push(
            format!("dis_cc_{n}_{code}_charm"),
            on,
            &format!("DIS CC ({name})"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(directory: &str) -> Vec<String> {
        let tag = DirectoryTag::parse(directory).unwrap();
        categories(&tag).into_iter().map(|c| c.name).collect()
    }

    #[test]
    fn test_nucleus_has_totals_and_both_blocks() {
        let names = names("nu_mu_C12");
        assert_eq!(names[0], "tot_cc");
        assert_eq!(names[1], "tot_nc");
        assert!(names.contains(&"tot_cc_n".to_owned()));
        assert!(names.contains(&"tot_cc_p".to_owned()));
        assert!(names.contains(&"res_nc_p_1710P11".to_owned()));
    }

    #[test]
    fn test_free_neutron_has_no_proton_block() {
        let names = names("nu_mu_n");
        assert!(!names.contains(&"tot_cc".to_owned()));
        assert!(names.iter().all(|n| !n.contains("_p")));
        assert!(names.contains(&"qel_cc_n".to_owned()));
    }

    #[test]
    fn test_charm_only_for_neutrinos() {
        let nu = names("nu_mu_Fe56");
        let nubar = names("nu_mu_bar_Fe56");
        assert!(nu.contains(&"dis_cc_n_dval_charm".to_owned()));
        assert!(!nubar.contains(&"dis_cc_n_dval_charm".to_owned()));
        assert!(nubar.contains(&"dis_cc_p_sbarsea_charm".to_owned()));
    }

    #[test]
    fn test_quasi_elastic_depends_on_flavour() {
        let nubar = names("nu_e_bar_H1");
        assert!(nubar.contains(&"qel_cc_p".to_owned()));
        let nu = names("nu_e_H1");
        assert!(!nu.contains(&"qel_cc_p".to_owned()));
    }

    #[test]
    fn test_titles() {
        let tag = DirectoryTag::parse("nu_mu_C12").unwrap();
        let cats = categories(&tag);
        assert_eq!(cats[0].title, "ν_μ + (C12), TOT CC");
        let res = cats
            .iter()
            .find(|c| c.name == "res_cc_n_1232P33")
            .unwrap();
        assert_eq!(res.title, "ν_μ + n (C12), RES CC, P33(1232)");
    }

    #[test]
    fn test_no_duplicate_names() {
        let mut names = names("nu_tau_bar_Ar40");
        let n = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), n);
    }
}
