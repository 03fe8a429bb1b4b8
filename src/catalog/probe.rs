use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Probe {
    NuE,
    NuEBar,
    NuMu,
    NuMuBar,
    NuTau,
    NuTauBar,
}

impl Probe {
    pub fn pdg(self) -> i32 {
        match self {
            Probe::NuE => 12,
            Probe::NuEBar => -12,
            Probe::NuMu => 14,
            Probe::NuMuBar => -14,
            Probe::NuTau => 16,
            Probe::NuTauBar => -16,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Probe::NuE => "ν_e",
            Probe::NuEBar => "ν̄_e",
            Probe::NuMu => "ν_μ",
            Probe::NuMuBar => "ν̄_μ",
            Probe::NuTau => "ν_τ",
            Probe::NuTauBar => "ν̄_τ",
        }
    }

    pub fn is_neutrino(self) -> bool {
        self.pdg() > 0
    }

    pub fn is_antineutrino(self) -> bool {
        self.pdg() < 0
    }
}

/// Directory-name fragments and the probe they encode. Longer fragments come
/// before the fragments they contain.
const PROBE_PATTERNS: [(&str, Probe); 6] = [
    ("nu_e_bar", Probe::NuEBar),
    ("nu_e", Probe::NuE),
    ("nu_mu_bar", Probe::NuMuBar),
    ("nu_mu", Probe::NuMu),
    ("nu_tau_bar", Probe::NuTauBar),
    ("nu_tau", Probe::NuTau),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Target {
    FreeNeutron,
    FreeProton,
    Nucleus(String),
}

impl Target {
    pub fn from_label(label: &str) -> Self {
        match label {
            "n" => Target::FreeNeutron,
            "H1" => Target::FreeProton,
            other => Target::Nucleus(other.to_owned()),
        }
    }

    pub fn has_protons(&self) -> bool {
        !matches!(self, Target::FreeNeutron)
    }

    pub fn has_neutrons(&self) -> bool {
        !matches!(self, Target::FreeProton)
    }

    pub fn is_free_nucleon(&self) -> bool {
        !matches!(self, Target::Nucleus(_))
    }

    /// Text appended to page titles: empty for free nucleons, `(C12)` for nuclei.
    pub fn title_suffix(&self) -> String {
        match self {
            Target::Nucleus(name) => format!("({name})"),
            _ => String::new(),
        }
    }
}

/// Probe and target decoded from a source directory name such as `nu_mu_bar_O16`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryTag {
    pub probe: Probe,
    pub target: Target,
}

impl DirectoryTag {
    pub fn parse(directory: &str) -> Option<Self> {
        let (pattern, probe) = PROBE_PATTERNS
            .iter()
            .find(|(pattern, _)| directory.contains(pattern))?;

        let start = directory.find(pattern)? + pattern.len();
        // skip the separator between probe and target
        let label = directory
            .get(start..)
            .map(|rest| rest.char_indices().nth(1).map_or("", |(i, _)| &rest[i..]))
            .unwrap_or("");

        Some(DirectoryTag {
            probe: *probe,
            target: Target::from_label(label),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_specific_probe_wins() {
        let tag = DirectoryTag::parse("nu_mu_bar_C12").unwrap();
        assert_eq!(tag.probe, Probe::NuMuBar);
        assert_eq!(tag.target, Target::Nucleus("C12".to_owned()));

        let tag = DirectoryTag::parse("nu_mu_C12").unwrap();
        assert_eq!(tag.probe, Probe::NuMu);

        let tag = DirectoryTag::parse("nu_e_bar_O16").unwrap();
        assert_eq!(tag.probe, Probe::NuEBar);
        assert_eq!(tag.target, Target::Nucleus("O16".to_owned()));
    }

    #[test]
    fn test_free_nucleons() {
        let n = DirectoryTag::parse("nu_tau_n").unwrap();
        assert_eq!(n.target, Target::FreeNeutron);
        assert!(n.target.has_neutrons());
        assert!(!n.target.has_protons());

        let p = DirectoryTag::parse("nu_e_H1").unwrap();
        assert_eq!(p.target, Target::FreeProton);
        assert!(p.target.has_protons());
        assert!(!p.target.has_neutrons());
        assert_eq!(p.target.title_suffix(), "");
    }

    #[test]
    fn test_unknown_directory() {
        assert!(DirectoryTag::parse("e_minus_Fe56").is_none());
    }

    #[test]
    fn test_probe_flavour() {
        assert!(Probe::NuTau.is_neutrino());
        assert!(Probe::NuEBar.is_antineutrino());
        assert_eq!(Probe::NuMuBar.pdg(), -14);
    }
}
