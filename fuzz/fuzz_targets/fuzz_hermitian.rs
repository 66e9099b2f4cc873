#![no_main]

use libfuzzer_sys::fuzz_target;

use dealias_core::direct::DirectHConvolution;
use dealias_core::{realmultbinary, Complex64, ImplicitHConvolution, Nyquist};

fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }
    // First byte picks m and the Nyquist layout, the rest seed the inputs
    let m = usize::from(data[0] % 64) + 1;
    let nyquist = if data[0] & 0x80 != 0 { Nyquist::Explicit } else { Nyquist::Compact };
    let bytes = &data[1..];
    let byte = |i: usize| f64::from(bytes[i % bytes.len()] % 17) - 8.0;
    let value = |k: usize| Complex64::new(byte(k), byte(5 * k + 2));
    let hermitian = |base: usize| -> Vec<Complex64> {
        let mut f: Vec<Complex64> = (base..base + m + 1).map(value).collect();
        f[0].im = 0.0;
        f[m].im = 0.0;
        f
    };
    let (f, g) = (hermitian(0), hermitian(m + 1));

    let mut expected = vec![Complex64::default(); m];
    DirectHConvolution::new(m, nyquist).convolve(&mut expected, &f, &g);

    let mut engine = ImplicitHConvolution::binary(m, nyquist).unwrap();
    let (mut f0, mut g0) = (f, g);
    engine.convolve(&mut [f0.as_mut_slice(), g0.as_mut_slice()], &realmultbinary, 0);

    for (k, (a, e)) in f0[..m].iter().zip(&expected).enumerate() {
        assert_eq!(a.re.round(), e.re, "real part of mode {k} at m={m}");
        assert_eq!(a.im.round(), e.im, "imaginary part of mode {k} at m={m}");
    }
});
