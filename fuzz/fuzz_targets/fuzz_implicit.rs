#![no_main]

use libfuzzer_sys::fuzz_target;

use dealias_core::direct::DirectConvolution;
use dealias_core::{multbinary, Complex64, ImplicitConvolution};

fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }
    // First byte picks m, the rest seed the two inputs with small integers
    let m = usize::from(data[0] % 64) + 1;
    let bytes = &data[1..];
    let byte = |i: usize| f64::from(bytes[i % bytes.len()] % 17) - 8.0;
    let value = |k: usize| Complex64::new(byte(k), byte(3 * k + 1));
    let f: Vec<Complex64> = (0..m).map(value).collect();
    let g: Vec<Complex64> = (m..2 * m).map(value).collect();

    let mut expected = vec![Complex64::default(); m];
    DirectConvolution::new(m).convolve(&mut expected, &f, &g);

    let mut engine = ImplicitConvolution::binary(m).unwrap();
    let (mut f0, mut g0) = (f, g);
    engine.convolve(&mut [f0.as_mut_slice(), g0.as_mut_slice()], &multbinary, 0);

    // Integer inputs give integer outputs; rounding must recover them
    for (k, (a, e)) in f0.iter().zip(&expected).enumerate() {
        assert_eq!(a.re.round(), e.re, "real part of mode {k} at m={m}");
        assert_eq!(a.im.round(), e.im, "imaginary part of mode {k} at m={m}");
    }
});
