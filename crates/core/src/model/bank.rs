//! The built-in synaptic transmission and plasticity question bank.

use super::question::{Question, QuestionBank};

impl QuestionBank {
    /// The twelve-question synaptic transmission and plasticity quiz.
    #[must_use]
    pub fn synaptic() -> Self {
        let questions = vec![
            Question::from_static(
                "What is the primary neurotransmitter released at the neuromuscular junction?",
                ["Dopamine", "Acetylcholine", "Serotonin", "GABA"],
                1,
            ),
            Question::from_static(
                "Long-term potentiation (LTP) is most strongly associated with which receptor?",
                ["GABA-A receptor", "Nicotinic receptor", "NMDA receptor", "Opioid receptor"],
                2,
            ),
            Question::from_static(
                "What ion influx is primarily responsible for the depolarization phase of an action potential?",
                ["Potassium (K+)", "Calcium (Ca2+)", "Sodium (Na+)", "Chloride (Cl-)"],
                2,
            ),
            Question::from_static(
                "Which process describes the reuptake of neurotransmitters back into the presynaptic neuron?",
                ["Exocytosis", "Endocytosis", "Pinocytosis", "Transporter-mediated uptake"],
                3,
            ),
            Question::from_static(
                "What is the synaptic cleft?",
                [
                    "The interior of a neuron",
                    "The gap between the presynaptic and postsynaptic membranes",
                    "A type of ion channel",
                    "The myelin sheath",
                ],
                1,
            ),
            Question::from_static(
                "Which phenomenon describes the decrease in synaptic strength following repeated stimulation?",
                [
                    "Long-term potentiation",
                    "Synaptic facilitation",
                    "Long-term depression",
                    "Sensitization",
                ],
                2,
            ),
            Question::from_static(
                "SNARE proteins are essential for which process?",
                [
                    "Action potential propagation",
                    "Vesicle fusion and neurotransmitter release",
                    "Receptor activation",
                    "Myelin formation",
                ],
                1,
            ),
            Question::from_static(
                "What type of synapse uses direct electrical coupling between neurons?",
                [
                    "Chemical synapse",
                    "Gap junction",
                    "Axo-axonic synapse",
                    "Neuromuscular junction",
                ],
                1,
            ),
            Question::from_static(
                "Hebbian plasticity is often summarized as:",
                [
                    "Neurons that fire apart, wire apart",
                    "Neurons that fire together, wire together",
                    "Use it or lose it",
                    "All or none response",
                ],
                1,
            ),
            Question::from_static(
                "Which protein is crucial for the calcium-dependent release of neurotransmitters?",
                ["Actin", "Synaptotagmin", "Tubulin", "Spectrin"],
                1,
            ),
            Question::from_static(
                "What is the role of acetylcholinesterase at the synapse?",
                [
                    "Synthesize acetylcholine",
                    "Transport acetylcholine into vesicles",
                    "Break down acetylcholine in the synaptic cleft",
                    "Release acetylcholine",
                ],
                2,
            ),
            Question::from_static(
                "Spike-timing-dependent plasticity (STDP) depends on:",
                [
                    "The frequency of action potentials only",
                    "The relative timing of pre and postsynaptic spikes",
                    "The size of the synapse",
                    "The number of dendrites",
                ],
                1,
            ),
        ];

        Self::from_static(questions)
    }
}
